use crate::conf::validation::ConfigError;
use glob::glob;
use std::path::{Path, PathBuf};

/// Files matching `glob_pattern` under `root`, sorted.
///
/// Entries the glob iterator cannot read are skipped.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if the pattern is malformed.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let pattern = resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(&pattern)
        .map_err(|e| ConfigError::Glob {
            pattern: pattern.clone(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Joins `pattern` onto `root`.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    root.join(pattern).to_string_lossy().into_owned()
}
