//! On-disk project state

pub mod config;
pub mod layout;
