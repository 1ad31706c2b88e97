use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Failures reported by a single conversion call.
///
/// None of these are fatal to the request: the caller leaves the URI as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unsupported encoding pair: {from} -> {to}")]
    UnsupportedEncodingPair { from: String, to: String },

    #[error("illegal byte sequence: {0}")]
    IllegalSequence(IllegalSequence),

    #[error("output buffer of {capacity} bytes exhausted after writing {written} bytes")]
    Incomplete { capacity: usize, written: usize },

    #[error("failed to allocate {requested} bytes for conversion")]
    AllocationFailure { requested: usize },
}

/// Where the input stopped being representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalSequence {
    /// Bytes at `offset` are not valid in the source encoding.
    Malformed { offset: usize, len: usize },

    /// A decoded character has no mapping in the target encoding.
    Unmappable { ch: char },
}

impl Display for IllegalSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { offset, len } => {
                write!(f, "{len} malformed byte(s) at input offset {offset}")
            }
            Self::Unmappable { ch } => write!(f, "U+{:04X} has no mapping in target", *ch as u32),
        }
    }
}

impl ConversionError {
    pub fn unsupported(from: &str, to: &str) -> Self {
        Self::UnsupportedEncodingPair {
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }

    /// Short, stable name used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedEncodingPair { .. } => "unsupported_encoding_pair",
            Self::IllegalSequence(_) => "illegal_sequence",
            Self::Incomplete { .. } => "incomplete",
            Self::AllocationFailure { .. } => "allocation_failure",
        }
    }
}
