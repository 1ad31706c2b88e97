use crate::conf::types::{MultiplierSpec, Origin, Phase, SizeSpec};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Top-level `urlconv.hcl`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrypointSpec {
    #[serde(default)]
    pub server: ServerSpec,

    #[serde(default, rename = "location")]
    pub locations: BTreeMap<String, LocationBlocks>,

    pub include: Option<IncludeSpec>,
}

/// Extra files to read, as globs relative to the config directory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeSpec {
    pub locations: String,
}

/// A file pulled in through `include.locations`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationsFileSpec {
    #[serde(default, rename = "location")]
    pub locations: BTreeMap<String, LocationBlocks>,
}

/// Every `location` block that shares one label.
///
/// HCL groups repeated labels into a list. Keeping them lets the loader
/// report the duplicate instead of failing inside the deserializer.
#[derive(Debug, Clone)]
pub struct LocationBlocks(pub Vec<LocationSpec>);

impl<'de> Deserialize<'de> for LocationBlocks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BlocksVisitor;

        impl<'de> Visitor<'de> for BlocksVisitor {
            type Value = LocationBlocks;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a location block")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let block = LocationSpec::deserialize(MapAccessDeserializer::new(map))?;
                Ok(LocationBlocks(vec![block]))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(LocationBlocks)
            }
        }

        deserializer.deserialize_any(BlocksVisitor)
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Directory the request URI is appended to.
    pub root: Option<PathBuf>,

    pub url_encoding_convert: Option<UrlConvertSpec>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocationSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Prefix this location matches; taken from the block label.
    #[serde(skip_deserializing)]
    pub path: String,

    pub root: Option<PathBuf>,

    /// Directory that replaces the location prefix.
    pub alias: Option<PathBuf>,

    pub url_encoding_convert: Option<UrlConvertSpec>,
}

/// The `url_encoding_convert { ... }` block.
///
/// Every field is optional so an inner scope can inherit from an outer one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UrlConvertSpec {
    pub enable: Option<bool>,

    /// Hook that does the work: `early` (before routing) or `late` (after routing).
    pub phase: Option<Phase>,

    /// Output buffer multiplier, 4 to 16, as `8` or `"x8"`.
    pub alloc_size_x: Option<MultiplierSpec>,

    /// Output buffer floor in bytes.
    pub alloc_size: Option<SizeSpec>,

    /// Encoding the client sent.
    pub from: Option<String>,

    /// Encoding the filesystem uses.
    pub to: Option<String>,
}

/// Everything parsed from a config directory, before lowering.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConfigSpec {
    pub server: ServerSpec,
    pub locations: Vec<LocationSpec>,
}
