//! Local dependency bundle installation

use std::path::Path;

use tracing::{debug, info};

use crate::app::context::DeploymentContext;
use crate::deploy::command::{run_checked, CommandOutput, CommandRunner, CommandSpec};
use crate::errors::DeployerError;
use crate::filesys::dir::Dir;
use crate::storage::layout::MODULES_DIR_NAME;

/// Marker in the names of distribution metadata directories
pub const DIST_INFO_MARKER: &str = "dist-info";

/// Contents of the bundle's `__init__.py`: appends the bundle to `sys.path`
/// so handler code can `import python_modules` and then its dependencies.
pub fn path_amplifier() -> String {
    format!(
        "#! /usr/bin/python3\nimport sys\nsys.path.append(f'{{sys.path[0]}}/{}')\n",
        MODULES_DIR_NAME
    )
}

/// Install a single package into `target`
pub async fn install_package(
    runner: &dyn CommandRunner,
    program: &str,
    context: &DeploymentContext,
    target: &Path,
    package: &str,
) -> Result<CommandOutput, DeployerError> {
    info!("Installing {} into {}", package, target.display());
    let command = CommandSpec::new(program, context)
        .args(["install", "--quiet", "-t"])
        .arg(target.display().to_string())
        .arg(package);
    run_checked(runner, &command).await
}

/// Remove distribution metadata directories from the bundle.
///
/// Returns the names of the removed directories.
pub async fn prune_dist_info(bundle: &Dir) -> Result<Vec<String>, DeployerError> {
    let mut removed = Vec::new();

    for path in bundle.list_dirs().await? {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if name.contains(DIST_INFO_MARKER) {
            debug!("Removing {}", path.display());
            Dir::new(&path).delete().await?;
            removed.push(name);
        }
    }

    Ok(removed)
}
