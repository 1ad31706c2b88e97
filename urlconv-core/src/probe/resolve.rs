use crate::conf::types::DocumentRoot;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("request path is not absolute")]
    NotAbsolute,

    #[error("request path is outside alias prefix '{prefix}'")]
    OutsideAlias { prefix: String },

    #[error("no document root configured for scope '{scope}'")]
    NoDocumentRoot { scope: String },
}

/// Map a logical URI onto the filesystem the way the serving layer does.
///
/// `Root(dir)` appends the whole URI to `dir`. `Alias { prefix, dir }`
/// replaces `prefix` with `dir`. The URI is raw bytes: after conversion it is
/// usually not UTF-8.
pub fn map_uri_to_path(root: &DocumentRoot, uri: &[u8]) -> Result<PathBuf, MapError> {
    if uri.first() != Some(&b'/') {
        return Err(MapError::NotAbsolute);
    }

    let (dir, rest) = match root {
        DocumentRoot::Root(dir) => (dir, uri),
        DocumentRoot::Alias { prefix, dir } => {
            let rest = uri
                .strip_prefix(prefix.as_bytes())
                .ok_or_else(|| MapError::OutsideAlias {
                    prefix: prefix.clone(),
                })?;
            (dir, rest)
        }
    };

    let rest = trim_leading_slashes(rest);
    if rest.is_empty() {
        return Ok(dir.clone());
    }

    Ok(dir.join(bytes_to_path(rest)))
}

fn trim_leading_slashes(mut bytes: &[u8]) -> &[u8] {
    while let [b'/', tail @ ..] = bytes {
        bytes = tail;
    }
    bytes
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> &Path {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Path::new(OsStr::from_bytes(bytes))
}

// Non-UTF-8 names are not representable here; they never match a file.
#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
