mod resolve;
#[cfg(test)]
mod tests;

pub use resolve::{MapError, map_uri_to_path};

use crate::conf::types::DocumentRoot;
use std::fs;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Exists,
    NotExists,
}

/// Decides whether a request path already resolves to something on disk.
///
/// This is a trigger heuristic, not an authoritative check.
pub trait ExistenceProbe: Send + Sync {
    /// Only a failure to map the URI is an error; anything that goes wrong
    /// while querying the filesystem is `NotExists`.
    fn probe(&self, root: &DocumentRoot, uri: &[u8]) -> Result<Existence, MapError>;
}

/// Probes the real filesystem with `stat` (symlinks followed).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl ExistenceProbe for FsProbe {
    fn probe(&self, root: &DocumentRoot, uri: &[u8]) -> Result<Existence, MapError> {
        let path = map_uri_to_path(root, uri)?;

        // Blocking call; nothing is locked across it.
        match fs::metadata(&path) {
            Ok(_) => Ok(Existence::Exists),
            Err(err) => {
                trace!(path = %path.display(), error = %err, "probe miss");
                Ok(Existence::NotExists)
            }
        }
    }
}
