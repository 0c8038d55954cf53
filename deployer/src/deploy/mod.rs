//! Deployment module

pub mod archive;
pub mod command;
pub mod confirm;
pub mod orchestrator;
pub mod pip;
pub mod templates;
