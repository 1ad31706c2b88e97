mod buffer;
mod context;
mod converter;
mod error;
#[cfg(test)]
mod tests;

pub use buffer::buffer_capacity;
pub use context::{ContextState, ConversionContext, resolve_pair};
pub use converter::{Transcoded, convert};
pub use error::{ConversionError, IllegalSequence};
