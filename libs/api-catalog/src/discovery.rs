//! Api specification discovery

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CatalogError;

/// Name of the microservice's own configuration file, never an api
pub const CONFIG_API_NAME: &str = "pym-config";

/// Api every microservice serves
pub const PING_API_NAME: &str = "ping";

const SPEC_EXTENSION: &str = "yaml";

/// Api specifications found under a directory, by api name
#[derive(Debug, Clone, Default)]
pub struct ApiCatalog {
    dir: PathBuf,
    apis: BTreeMap<String, PathBuf>,
}

/// Which discovered apis a process serves and which it only calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServePlan {
    pub served: Vec<String>,
    pub clients: Vec<String>,
}

fn is_editor_artifact(file_name: &str) -> bool {
    file_name.starts_with('#') || file_name.starts_with(".#")
}

impl ApiCatalog {
    /// Walk `dir` recursively and collect every `<name>.yaml` file.
    ///
    /// Editor lock and autosave files (`#...`, `.#...`), the names in
    /// `ignore` and the service configuration file are skipped.
    pub fn discover(dir: impl AsRef<Path>, ignore: &[&str]) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound(dir.to_path_buf()));
        }

        debug!("Searching path {}", dir.display());
        let mut apis = BTreeMap::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_dir() {
                    pending.push(path);
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().into_owned();
                if is_editor_artifact(&file_name) {
                    info!("Ignoring file {}", file_name);
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) != Some(SPEC_EXTENSION) {
                    continue;
                }
                let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                    continue;
                };
                if name == CONFIG_API_NAME || ignore.contains(&name.as_str()) {
                    info!("Ignoring api {}", name);
                    continue;
                }

                debug!("Found api {} in {}", name, path.display());
                apis.insert(name, path);
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            apis,
        })
    }

    /// Get the searched directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the specification path of an api
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.apis.get(name).map(PathBuf::as_path)
    }

    /// Names of all discovered apis, sorted
    pub fn names(&self) -> Vec<&str> {
        self.apis.keys().map(String::as_str).collect()
    }

    /// Iterate over `(name, path)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.apis.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Split the catalog into served and client-only apis.
    ///
    /// Every name in `serve` must have been discovered. `ping` is always
    /// served, whether or not it was discovered.
    pub fn serve_plan<S: AsRef<str>>(&self, serve: &[S]) -> Result<ServePlan, CatalogError> {
        if serve.is_empty() {
            return Err(CatalogError::EmptyServeList);
        }

        let mut served: Vec<String> = Vec::new();
        for name in serve {
            let name = name.as_ref();
            if !self.apis.contains_key(name) {
                return Err(CatalogError::UnknownApi {
                    name: name.to_string(),
                    dir: self.dir.clone(),
                });
            }
            if !served.iter().any(|s| s == name) {
                served.push(name.to_string());
            }
        }
        if !served.iter().any(|s| s == PING_API_NAME) {
            served.push(PING_API_NAME.to_string());
        }

        let clients = self
            .apis
            .keys()
            .filter(|name| !served.contains(*name))
            .cloned()
            .collect();

        Ok(ServePlan { served, clients })
    }
}
