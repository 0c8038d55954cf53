//! Registry of loaded api specifications

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::discovery::ApiCatalog;
use crate::error::CatalogError;

/// The parts of a Swagger 2 / OpenAPI 3 document the registry looks at
#[derive(Debug, Default, Deserialize)]
struct SpecDocument {
    #[serde(default)]
    swagger: Option<String>,

    #[serde(default)]
    openapi: Option<String>,

    /// Swagger 2 models
    #[serde(default)]
    definitions: BTreeMap<String, serde_yaml::Value>,

    #[serde(default)]
    components: Components,
}

/// OpenAPI 3 components
#[derive(Debug, Default, Deserialize)]
struct Components {
    #[serde(default)]
    schemas: BTreeMap<String, serde_yaml::Value>,
}

/// A loaded api
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEntry {
    /// Path of the specification file
    pub path: PathBuf,

    /// Names of the objects the specification declares
    pub models: BTreeSet<String>,
}

/// Api name to specification registry
#[derive(Debug, Clone, Default)]
pub struct ApiRegistry {
    apis: BTreeMap<String, ApiEntry>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a specification file and register it under `name`.
    ///
    /// Loading the same name again replaces the previous entry.
    pub fn load_spec(&mut self, name: &str, path: impl AsRef<Path>) -> Result<&ApiEntry, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let document: SpecDocument =
            serde_yaml::from_str(&contents).map_err(|e| CatalogError::InvalidSpec {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if document.swagger.is_none() && document.openapi.is_none() {
            return Err(CatalogError::InvalidSpec {
                path: path.to_path_buf(),
                reason: "neither a 'swagger' nor an 'openapi' version is declared".to_string(),
            });
        }

        let models: BTreeSet<String> = document
            .definitions
            .into_keys()
            .chain(document.components.schemas.into_keys())
            .collect();
        debug!("Api {} declares {} models", name, models.len());

        let entry = ApiEntry {
            path: path.to_path_buf(),
            models,
        };
        self.apis.insert(name.to_string(), entry);
        info!("Loaded api {} from {}", name, path.display());

        self.get(name)
    }

    /// Load every api of a catalog
    pub fn load_catalog(&mut self, catalog: &ApiCatalog) -> Result<(), CatalogError> {
        for (name, path) in catalog.iter() {
            self.load_spec(name, path)?;
        }
        Ok(())
    }

    /// Load `<dir>/<api>.yaml` for each of `apis`, for use as clients only
    pub fn load_clients<S: AsRef<str>>(&mut self, dir: impl AsRef<Path>, apis: &[S]) -> Result<(), CatalogError> {
        let dir = dir.as_ref();
        if apis.is_empty() {
            return Err(CatalogError::EmptyClientList);
        }

        for name in apis {
            let name = name.as_ref();
            let path = dir.join(format!("{}.yaml", name));
            if !path.is_file() {
                return Err(CatalogError::UnknownApi {
                    name: name.to_string(),
                    dir: dir.to_path_buf(),
                });
            }
            self.load_spec(name, &path)?;
        }

        Ok(())
    }

    /// Get a loaded api
    pub fn get(&self, name: &str) -> Result<&ApiEntry, CatalogError> {
        self.apis
            .get(name)
            .ok_or_else(|| CatalogError::ApiNotLoaded(name.to_string()))
    }

    /// Get the specification path of an api, if loaded
    pub fn api_path(&self, name: &str) -> Option<&Path> {
        self.apis.get(name).map(|entry| entry.path.as_path())
    }

    /// Resolve a model declared by a loaded api
    pub fn model(&self, api: &str, model: &str) -> Result<&str, CatalogError> {
        self.apis
            .get(api)
            .and_then(|entry| entry.models.get(model))
            .map(String::as_str)
            .ok_or_else(|| CatalogError::ModelNotDefined {
                api: api.to_string(),
                model: model.to_string(),
            })
    }

    /// Names of the loaded apis, sorted
    pub fn names(&self) -> Vec<&str> {
        self.apis.keys().map(String::as_str).collect()
    }
}
