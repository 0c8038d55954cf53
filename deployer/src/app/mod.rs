//! Application wiring

pub mod cli;
pub mod context;
pub mod options;
pub mod run;
