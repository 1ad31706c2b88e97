use crate::convert::error::{ConversionError, IllegalSequence};
use encoding_rs::{Decoder, DecoderResult, Encoder, EncoderResult, Encoding};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Open,
    Closed,
}

/// A decoder/encoder pair bound to one (source, target) encoding pair.
///
/// A context serves exactly one conversion. It is released when `close` is
/// called or when it is dropped, whichever happens first.
pub struct ConversionContext {
    source: &'static Encoding,
    target: &'static Encoding,
    decoder: Decoder,
    encoder: Encoder,
    state: ContextState,
}

/// Look up both labels.
///
/// Labels follow the WHATWG registry (`utf-8`, `euc-kr`, `shift_jis`, ...).
/// The `replacement` encoding and targets that cannot be written to
/// (UTF-16LE/BE encode as UTF-8) have no mapping.
pub fn resolve_pair(
    from: &str,
    to: &str,
) -> Result<(&'static Encoding, &'static Encoding), ConversionError> {
    let unsupported = || ConversionError::unsupported(from, to);

    let source = Encoding::for_label_no_replacement(from.trim().as_bytes())
        .ok_or_else(unsupported)?;
    let target = Encoding::for_label_no_replacement(to.trim().as_bytes())
        .ok_or_else(unsupported)?;

    if target.output_encoding() != target {
        return Err(unsupported());
    }

    Ok((source, target))
}

impl ConversionContext {
    pub fn open(from: &str, to: &str) -> Result<Self, ConversionError> {
        let (source, target) = resolve_pair(from, to)?;

        trace!(
            from = source.name(),
            to = target.name(),
            "conversion context opened"
        );

        #[cfg(test)]
        counters::OPENED.with(|c| c.set(c.get() + 1));

        Ok(Self {
            source,
            target,
            decoder: source.new_decoder_without_bom_handling(),
            encoder: target.new_encoder(),
            state: ContextState::Open,
        })
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn source(&self) -> &'static Encoding {
        self.source
    }

    pub fn target(&self) -> &'static Encoding {
        self.target
    }

    /// Convert all of `input` into a buffer of exactly `capacity` bytes.
    ///
    /// Input is decoded to UTF-8 in full, then encoded into the output
    /// buffer. Running out of output space is `Incomplete`; the buffer is
    /// never grown.
    pub fn transcode(&mut self, input: &[u8], capacity: usize) -> Result<Vec<u8>, ConversionError> {
        debug_assert_eq!(self.state, ContextState::Open, "context used after release");

        let decoded = self.decode(input)?;

        let mut out = Vec::new();
        out.try_reserve_exact(capacity)
            .map_err(|_| ConversionError::AllocationFailure {
                requested: capacity,
            })?;
        out.resize(capacity, 0);

        let (result, _read, written) =
            self.encoder
                .encode_from_utf8_without_replacement(&decoded, &mut out, true);

        match result {
            EncoderResult::InputEmpty => {
                out.truncate(written);
                Ok(out)
            }
            EncoderResult::OutputFull => Err(ConversionError::Incomplete { capacity, written }),
            EncoderResult::Unmappable(ch) => Err(ConversionError::IllegalSequence(
                IllegalSequence::Unmappable { ch },
            )),
        }
    }

    fn decode(&mut self, input: &[u8]) -> Result<String, ConversionError> {
        let needed = self
            .decoder
            .max_utf8_buffer_length_without_replacement(input.len())
            .ok_or(ConversionError::AllocationFailure {
                requested: usize::MAX,
            })?;

        let mut decoded = String::new();
        decoded
            .try_reserve_exact(needed)
            .map_err(|_| ConversionError::AllocationFailure { requested: needed })?;

        let (result, read) =
            self.decoder
                .decode_to_string_without_replacement(input, &mut decoded, true);

        match result {
            DecoderResult::InputEmpty => Ok(decoded),
            DecoderResult::Malformed(bad, extra) => {
                let len = bad as usize;
                let offset = read.saturating_sub(len + extra as usize);
                Err(ConversionError::IllegalSequence(
                    IllegalSequence::Malformed { offset, len },
                ))
            }
            // The buffer was sized for the worst case.
            DecoderResult::OutputFull => Err(ConversionError::AllocationFailure {
                requested: needed,
            }),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.state == ContextState::Closed {
            return;
        }
        self.state = ContextState::Closed;

        trace!(
            from = self.source.name(),
            to = self.target.name(),
            "conversion context released"
        );

        #[cfg(test)]
        counters::RELEASED.with(|c| c.set(c.get() + 1));
    }
}

impl Drop for ConversionContext {
    fn drop(&mut self) {
        self.release();
    }
}
