//! User-tunable decoding options, mirroring the teacher crate's
//! `DeflateOptions` builder for the one-shot API.

use crate::constants::{MAX_WINDOW_BITS, MIN_WINDOW_BITS};

/// Configuration for the one-shot decoding entry points.
///
/// Streaming callers configure the window size directly through
/// [`crate::stream::InflateStream::new`]'s `window_bits` argument; checksum
/// verification has no streaming-facade equivalent, since `InflateStream`
/// never sees the container trailer. This type exists so the one-shot
/// convenience functions (`decode_deflate`, `decode_zlib`, `decode_gzip`)
/// have somewhere to take configuration without growing a long argument
/// list, the same role it plays in the teacher crate.
#[derive(Clone, Copy, Debug)]
pub struct DeflateOptions
{
    window_bits:      i8,
    confirm_checksum: bool,
    size_hint:        Option<usize>,
    limit:            Option<usize>
}

impl Default for DeflateOptions
{
    fn default() -> Self
    {
        DeflateOptions {
            window_bits:      MAX_WINDOW_BITS,
            confirm_checksum: true,
            size_hint:        None,
            limit:            None
        }
    }
}

impl DeflateOptions
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Set the base-2 logarithm of the sliding window size. Its *magnitude*
    /// is clamped to `[8, 15]`; the sign is preserved, matching the
    /// conventional raw-DEFLATE idiom (a negative value) accepted by
    /// [`crate::stream::InflateStream::new`]. Only meaningful for raw
    /// `decode_deflate`; zlib and gzip containers carry their own window
    /// size in the header and this value is ignored for them.
    pub fn set_window_bits(mut self, window_bits: i8) -> Self
    {
        let magnitude = window_bits.unsigned_abs().clamp(MIN_WINDOW_BITS as u8, MAX_WINDOW_BITS as u8) as i8;
        self.window_bits = if window_bits < 0 { -magnitude } else { magnitude };
        self
    }

    pub fn get_window_bits(&self) -> i8
    {
        self.window_bits
    }

    /// Whether to verify the trailing Adler-32 (zlib) or CRC-32 (gzip)
    /// checksum against the decoded output. Enabled by default; disabling
    /// it lets a caller accept a stream whose checksum they don't trust or
    /// don't have (e.g. a truncated capture).
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self
    {
        self.confirm_checksum = yes;
        self
    }

    pub fn get_confirm_checksum(&self) -> bool
    {
        self.confirm_checksum
    }

    /// Preallocate the output buffer to this many bytes. Purely an
    /// allocation hint: decoding still grows the buffer past this size if
    /// the stream produces more.
    pub fn set_size_hint(mut self, size_hint: usize) -> Self
    {
        self.size_hint = Some(size_hint);
        self
    }

    pub fn get_size_hint(&self) -> Option<usize>
    {
        self.size_hint
    }

    /// Abort decoding with [`crate::errors::DecodeErrorStatus::OutputLimitExceeded`]
    /// once output would exceed this many bytes. Unset by default, meaning
    /// the caller trusts the input not to be a decompression bomb.
    pub fn set_limit(mut self, limit: usize) -> Self
    {
        self.limit = Some(limit);
        self
    }

    pub fn get_limit(&self) -> Option<usize>
    {
        self.limit
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn set_window_bits_preserves_sign_while_clamping_magnitude()
    {
        assert_eq!(DeflateOptions::new().set_window_bits(-15).get_window_bits(), -15);
        assert_eq!(DeflateOptions::new().set_window_bits(15).get_window_bits(), 15);
        // Out-of-range magnitude clamps, sign still preserved.
        assert_eq!(DeflateOptions::new().set_window_bits(-20).get_window_bits(), -15);
        assert_eq!(DeflateOptions::new().set_window_bits(2).get_window_bits(), 8);
    }
}
