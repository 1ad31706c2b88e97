use crate::conf::types::{
    EntrypointSpec, IncludeSpec, LocationBlocks, LocationSpec, LocationsFileSpec, Origin,
    ServerSpec,
};
use crate::conf::validation::ConfigError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const ENTRYPOINT_FILE: &str = "urlconv.hcl";

#[derive(Debug)]
pub struct ParsedEntrypoint {
    pub server: ServerSpec,
    pub locations: Vec<LocationSpec>,
    pub include: Option<IncludeSpec>,
}

pub fn parse_entrypoint(path: &Path) -> Result<ParsedEntrypoint, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_entrypoint_str(&s, path)
}

pub fn parse_entrypoint_str(s: &str, path: &Path) -> Result<ParsedEntrypoint, ConfigError> {
    let mut parsed: EntrypointSpec = hcl::from_str(s).map_err(|e| ConfigError::parse(path, e))?;

    parsed.server.origin = Origin::new(path, "server", None);

    Ok(ParsedEntrypoint {
        server: parsed.server,
        locations: label_locations(parsed.locations, path),
        include: parsed.include,
    })
}

pub fn parse_locations(path: &Path) -> Result<Vec<LocationSpec>, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let parsed: LocationsFileSpec = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    Ok(label_locations(parsed.locations, path))
}

//-------------------------------------------------------------------------
// Inject the block label and origin metadata
//-------------------------------------------------------------------------
fn label_locations(
    locations: BTreeMap<String, LocationBlocks>,
    path: &Path,
) -> Vec<LocationSpec> {
    locations
        .into_iter()
        .flat_map(|(label, LocationBlocks(blocks))| {
            blocks.into_iter().map(move |mut location| {
                location.origin = Origin::new(path, "location", Some(&label));
                location.path = label.clone();
                location
            })
        })
        .collect()
}
