//! Build configuration from file and command-line overrides.

use ormedm_core::{BuildConfig, Result};
use std::path::Path;

/// Load the build configuration.
///
/// Starts from the file at `path` (or the defaults) and applies the
/// command-line overrides on top.
pub fn load(
    path: Option<&Path>,
    namespace: Option<&str>,
    container: Option<&str>,
) -> Result<BuildConfig> {
    let mut config = match path {
        Some(path) => BuildConfig::from_path(path)?,
        None => BuildConfig::new(),
    };

    if let Some(namespace) = namespace {
        config = config.with_namespace(namespace);
    }
    if let Some(container) = container {
        config = config.with_container_name(container);
    }
    Ok(config)
}
