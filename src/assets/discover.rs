use std::path::{Path, PathBuf};

use crate::foundation::error::{JumpscareError, JumpscareResult};

/// File names looked up in the resources directory, in rotation order.
pub const DEFAULT_ASSET_ORDER: [&str; 4] = ["1.gif", "2.gif", "3.gif", "4.png"];

/// [`DEFAULT_ASSET_ORDER`] as owned strings, for configuration defaults.
pub fn default_asset_order() -> Vec<String> {
    DEFAULT_ASSET_ORDER.iter().map(|s| s.to_string()).collect()
}

/// Existing files from `preferred`, resolved against `dir`, in the given order.
///
/// Fails with [`JumpscareError::ResourceMissing`] when `dir` is not a directory
/// or none of the candidates exist.
pub fn discover_assets(dir: &Path, preferred: &[String]) -> JumpscareResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(JumpscareError::resource_missing(format!(
            "resources folder not found: {}",
            dir.display()
        )));
    }

    let found = preferred
        .iter()
        .map(|name| dir.join(name))
        .filter(|p| p.is_file())
        .collect::<Vec<_>>();

    if found.is_empty() {
        return Err(JumpscareError::resource_missing(format!(
            "no supported images/gifs found in {}",
            dir.display()
        )));
    }

    tracing::debug!(count = found.len(), dir = %dir.display(), "discovered assets");
    Ok(found)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;
