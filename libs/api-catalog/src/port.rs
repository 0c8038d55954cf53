//! Listening port resolution

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::CatalogError;

pub const DEFAULT_PORT: u16 = 80;

/// Checked in order, first one set wins
pub const PORT_VARS: [&str; 2] = ["PORT", "PYM_SERVER_PORT"];

/// Resolve the port a microservice should listen on from its environment
pub fn resolve_port(env: &BTreeMap<String, String>) -> Result<u16, CatalogError> {
    for var in PORT_VARS {
        if let Some(value) = env.get(var) {
            let port = value.trim().parse::<u16>().map_err(|_| CatalogError::InvalidPort {
                var: var.to_string(),
                value: value.clone(),
            })?;
            debug!("Using port {} from {}", port, var);
            return Ok(port);
        }
    }
    Ok(DEFAULT_PORT)
}
