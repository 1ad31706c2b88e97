use crate::convert::context::ConversionContext;
use crate::convert::error::ConversionError;

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded {
    /// Converted bytes; the length is the number of bytes actually written.
    pub bytes: Vec<u8>,

    /// Capacity the output buffer was allocated with.
    pub capacity: usize,
}

impl Transcoded {
    pub fn written(&self) -> usize {
        self.bytes.len()
    }
}

/// Convert `input` from `from` to `to` into a buffer of `capacity` bytes.
///
/// The context opened here is closed before this function returns, on the
/// success path and on every error path.
pub fn convert(
    from: &str,
    to: &str,
    input: &[u8],
    capacity: usize,
) -> Result<Transcoded, ConversionError> {
    let mut ctx = ConversionContext::open(from, to)?;
    let result = ctx.transcode(input, capacity);
    ctx.close();

    result.map(|bytes| Transcoded { bytes, capacity })
}
