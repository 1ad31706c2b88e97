use crate::conf::discover::discover;
use crate::conf::lower::lower_config;
use crate::conf::parse::{ENTRYPOINT_FILE, parse_entrypoint, parse_locations};
use crate::conf::types::{ConfigSpec, LocationSpec};
use crate::conf::validation::{ConfigError, ValidatedConfig, validate_spec};
use std::collections::HashSet;
use std::path::Path;

/// Load, validate and lower the config directory at `root`.
pub fn load_config(root: &Path) -> Result<ValidatedConfig, ConfigError> {
    let spec = load_spec_config(root)?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all issues)
    //--------------------------------------------------------------------------
    let report = validate_spec(&spec);
    if report.has_errors() {
        return Err(ConfigError::Validation { report });
    }

    let config = lower_config(&spec);

    Ok(ValidatedConfig {
        spec,
        config,
        validation: report,
    })
}

/// Parse the config directory without validating it.
pub fn load_spec_config(root: &Path) -> Result<ConfigSpec, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let entry = parse_entrypoint(&root.join(ENTRYPOINT_FILE))?;

    let mut locations = entry.locations;

    //--------------------------------------------------------------------------
    // Included location files (hard fail)
    //--------------------------------------------------------------------------
    if let Some(include) = &entry.include {
        for path in discover(root, &include.locations)? {
            locations.extend(parse_locations(&path)?);
        }
    }

    check_duplicate_locations(&locations)?;

    Ok(ConfigSpec {
        server: entry.server,
        locations,
    })
}

fn check_duplicate_locations(locations: &[LocationSpec]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for location in locations {
        if !seen.insert(location.path.as_str()) {
            return Err(ConfigError::DuplicateLocation {
                path: location.path.clone(),
                file: location.origin.file().to_path_buf(),
            });
        }
    }
    Ok(())
}
