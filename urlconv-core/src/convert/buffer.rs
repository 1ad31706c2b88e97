use crate::conf::types::ConversionConfig;

/// Output capacity for an input of `input_len` bytes.
///
/// `input_len * multiplier + 1`, raised to `minimum` when the administrator
/// configured a larger floor. Never returns 0. Returns `None` only when the
/// product does not fit in a `usize`.
pub fn buffer_capacity(input_len: usize, multiplier: usize, minimum: usize) -> Option<usize> {
    let candidate = input_len.checked_mul(multiplier)?.checked_add(1)?;
    Some(candidate.max(minimum))
}

impl ConversionConfig {
    pub fn output_capacity(&self, input_len: usize) -> Option<usize> {
        buffer_capacity(
            input_len,
            self.buffer_size_multiplier,
            self.minimum_buffer_size,
        )
    }
}
