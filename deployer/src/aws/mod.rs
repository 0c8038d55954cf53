//! AWS command line wrappers

pub mod client;
pub mod iam;
pub mod lambda;
