//! Api catalog for Lambda-hosted microservices.
//!
//! Finds the Swagger/OpenAPI specifications a microservice ships with,
//! decides which of them it serves and which it only calls, and keeps a
//! registry of the objects each loaded api declares.

pub mod discovery;
pub mod error;
pub mod port;
pub mod registry;

pub use discovery::{ApiCatalog, ServePlan};
pub use error::CatalogError;
pub use port::resolve_port;
pub use registry::{ApiEntry, ApiRegistry};
