//! Lambda Deployer Library
//!
//! Core modules for packaging a Python function and managing it on AWS Lambda.

pub mod app;
pub mod aws;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod storage;
pub mod utils;
