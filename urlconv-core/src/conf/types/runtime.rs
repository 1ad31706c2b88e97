use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_FROM_ENCODING: &str = "utf-8";
pub const DEFAULT_TO_ENCODING: &str = "euc-kr";
pub const DEFAULT_BUFFER_SIZE_MULTIPLIER: usize = 4;
pub const MIN_BUFFER_SIZE_MULTIPLIER: usize = 4;
pub const MAX_BUFFER_SIZE_MULTIPLIER: usize = 16;

/// A pipeline hook point, and the setting that picks which one does the work.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Before routing and rewriting.
    Early,
    /// After routing and rewriting.
    #[default]
    Late,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Early => f.write_str("early"),
            Phase::Late => f.write_str("late"),
        }
    }
}

/// Fully resolved filter settings for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionConfig {
    pub enabled: bool,
    pub active_phase: Phase,
    pub buffer_size_multiplier: usize,
    pub minimum_buffer_size: usize,
    pub source_encoding: String,
    pub target_encoding: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            active_phase: Phase::Late,
            buffer_size_multiplier: DEFAULT_BUFFER_SIZE_MULTIPLIER,
            minimum_buffer_size: 0,
            source_encoding: DEFAULT_FROM_ENCODING.to_string(),
            target_encoding: DEFAULT_TO_ENCODING.to_string(),
        }
    }
}

/// How a logical URI maps onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRoot {
    /// `dir` + full URI.
    Root(PathBuf),

    /// `dir` + URI with `prefix` stripped.
    Alias { prefix: String, dir: PathBuf },
}

/// Settings in effect for a request while it is in a given scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeConfig {
    /// `server`, or the location prefix.
    pub name: String,
    pub conversion: ConversionConfig,
    pub document_root: Option<DocumentRoot>,
}

impl ScopeConfig {
    pub fn server(conversion: ConversionConfig, document_root: Option<DocumentRoot>) -> Self {
        Self {
            name: "server".to_string(),
            conversion,
            document_root,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationConfig {
    pub path: String,
    pub scope: Arc<ScopeConfig>,
}

/// Lowered configuration the gateway runs with.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub server: Arc<ScopeConfig>,
    pub locations: Vec<LocationConfig>,
}

impl RuntimeConfig {
    pub fn enabled_scopes(&self) -> usize {
        std::iter::once(&self.server)
            .chain(self.locations.iter().map(|l| &l.scope))
            .filter(|s| s.conversion.enabled)
            .count()
    }
}
