//! Error types for the api catalog

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the api catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Api directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Invalid api specification {}: {reason}", .path.display())]
    InvalidSpec { path: PathBuf, reason: String },

    #[error("You must specify at least one api to serve")]
    EmptyServeList,

    #[error("Expected at least one api name")]
    EmptyClientList,

    #[error("Can't find {name}.yaml (api specification) in {}", .dir.display())]
    UnknownApi { name: String, dir: PathBuf },

    #[error("Api {0} is not loaded")]
    ApiNotLoaded(String),

    #[error("Either {api}.yaml has not been loaded or it does not define object {model}")]
    ModelNotDefined { api: String, model: String },

    #[error("Invalid port in {var}: {value}")]
    InvalidPort { var: String, value: String },
}
