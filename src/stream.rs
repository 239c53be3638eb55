//! The streaming facade: `InflateStream::new` / `step`, modeled on the
//! classic `inflateInit2` / `inflate` ABI documented for historical parity
//! in the design notes, but expressed as an idiomatic safe-Rust cursor API
//! rather than a raw-pointer one. Dropping an `InflateStream` plays the
//! role the ABI's explicit `inflateEnd` verb plays in C.
//!
//! Unlike the teacher crate's `DeflateDecoder`, which borrows the whole
//! input buffer for its lifetime, this type owns no borrow at all between
//! calls: every `step()` is handed a fresh `input`/`output` slice pair, and
//! only the bits the [`crate::decoder::Decoder`] has already folded into
//! its accumulator (or a symbol it has already fully decoded) survive a
//! suspension.

use crate::bitstream::{InCursor, OutCursor};
use crate::decoder::{Decoder, StepOutcome};
use crate::errors::{DecodeErrorStatus, Status, StreamError};

/// Advisory flush hint passed to [`InflateStream::step`].
///
/// Mirrors the `flush` parameter of the historical ABI; every value other
/// than "the caller promises no more input is coming" behaves identically,
/// since this decoder never buffers output for later flush boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode
{
    /// No special handling: buffer exhaustion is always recoverable by
    /// feeding more of whichever cursor ran dry.
    #[default]
    None,
    /// The caller has supplied all the input it ever will. If `step`
    /// would otherwise ask for more input, the request is terminal:
    /// [`Status::BufError`] is returned instead of [`Status::Ok`], since no
    /// future call can supply the missing bytes.
    Finish
}

/// How much of each cursor a single [`InflateStream::step`] call consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport
{
    /// Bytes read from the `input` slice passed to this call.
    pub in_consumed: usize,
    /// Bytes written to the `output` slice passed to this call.
    pub out_written: usize
}

/// A resumable DEFLATE decoder.
///
/// Not `Clone` or `Copy`; `step` takes `&mut self`, which is Rust's
/// substitute for the ABI's "concurrent `step` calls on one state are
/// undefined" rule. Once `step` returns a data error the stream is
/// poisoned: every subsequent call returns the same error without
/// inspecting its arguments, until the value is dropped.
pub struct InflateStream
{
    decoder:   Decoder,
    total_in:  u64,
    poisoned:  Option<DecodeErrorStatus>
}

impl InflateStream
{
    /// The safe-Rust analogue of `inflateInit2`.
    ///
    /// `window_bits.abs()` selects a window of `2^window_bits.abs()` bytes
    /// and must be in `[8, 15]`. A negative magnitude historically meant
    /// "raw DEFLATE, no zlib wrapper" in the C-lineage ABI; it is accepted
    /// here for compatibility but has no effect, since this facade always
    /// decodes raw DEFLATE (container sniffing is the caller's job, via
    /// [`crate::decode_zlib`]/[`crate::decode_gzip`]).
    pub fn new(window_bits: i8) -> Result<Self, StreamError>
    {
        let magnitude = window_bits.unsigned_abs();
        if !(8..=15).contains(&magnitude)
        {
            return Err(StreamError::InvalidWindowBits(window_bits));
        }

        log::trace!("initializing inflate stream, window_bits={window_bits}");

        Ok(InflateStream { decoder: Decoder::new(magnitude), total_in: 0, poisoned: None })
    }

    /// Total bytes consumed from `input` slices across every `step` call
    /// on this stream so far.
    pub fn total_in(&self) -> u64
    {
        self.total_in
    }

    /// Total bytes emitted to `output` slices across every `step` call on
    /// this stream so far.
    pub fn total_out(&self) -> u64
    {
        self.decoder.bytes_emitted()
    }

    /// Advance decoding as far as `input`/`output` allow.
    ///
    /// Returns the [`Status`] plus how much of each cursor was consumed
    /// this call. Per the progress rule: a returned `Status::Ok` means at
    /// least one of (input consumed, output emitted, an internal state
    /// transition using only already-buffered bits) happened, so callers
    /// that loop on `Ok` can never spin without making headway.
    pub fn step(
        &mut self, input: &[u8], output: &mut [u8], flush: FlushMode
    ) -> Result<(Status, StepReport), DecodeErrorStatus>
    {
        if let Some(err) = &self.poisoned
        {
            return Err(err.clone());
        }

        let mut in_cursor = InCursor::new(input);
        let mut out_cursor = OutCursor::new(output);

        let outcome = self.decoder.step(&mut in_cursor, &mut out_cursor);

        let report =
            StepReport { in_consumed: in_cursor.consumed(), out_written: out_cursor.written() };
        self.total_in += report.in_consumed as u64;

        match outcome
        {
            Err(e) =>
            {
                log::warn!("deflate stream data error: {e:?}");
                self.poisoned = Some(e.clone());
                Err(e)
            }
            Ok((StepOutcome::StreamEnd, _)) =>
            {
                log::trace!("deflate stream end, total_out={}", self.total_out());
                Ok((Status::StreamEnd, report))
            }
            Ok((StepOutcome::NeedInput, progress)) =>
            {
                // The decoder's own `progress` flag only tracks bare state
                // transitions made from bits it already had buffered; bytes
                // pulled into the bit accumulator by `refill` (which may be
                // every byte of a straddling codeword, right up until the
                // final bit needed to resolve it) also count as forward
                // progress for the purposes of this rule, since the caller
                // handed us real input that we consumed.
                let progress = progress || report.in_consumed > 0 || report.out_written > 0;
                let exhausted_at_finish = flush == FlushMode::Finish && in_cursor.remaining() == 0;
                if exhausted_at_finish
                {
                    log::debug!("deflate stream truncated: Finish requested but final block not observed");
                    Ok((Status::BufError, report))
                }
                else if progress
                {
                    Ok((Status::Ok, report))
                }
                else
                {
                    Ok((Status::BufError, report))
                }
            }
            Ok((StepOutcome::NeedOutput, progress)) =>
            {
                let progress = progress || report.in_consumed > 0 || report.out_written > 0;
                if progress
                {
                    Ok((Status::Ok, report))
                }
                else
                {
                    Ok((Status::BufError, report))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    use crate::encoder::deflate_stored as stored_block;

    #[test]
    fn out_of_range_window_bits_is_rejected()
    {
        assert_eq!(InflateStream::new(7), Err(StreamError::InvalidWindowBits(7)));
        assert_eq!(InflateStream::new(16), Err(StreamError::InvalidWindowBits(16)));
        assert!(InflateStream::new(-15).is_ok());
    }

    #[test]
    fn single_byte_output_buffer_still_makes_progress()
    {
        let input = stored_block(b"abc");
        let mut stream = InflateStream::new(15).unwrap();
        let mut produced = Vec::new();
        let mut pos = 0;

        loop
        {
            let mut out = [0u8; 1];
            let (status, report) =
                stream.step(&input[pos..], &mut out, FlushMode::Finish).unwrap();
            pos += report.in_consumed;
            produced.extend_from_slice(&out[..report.out_written]);
            if status == Status::StreamEnd
            {
                break;
            }
            assert_ne!(status, Status::BufError, "must not livelock on a 1-byte output buffer");
        }

        assert_eq!(produced, b"abc");
    }

    #[test]
    fn truncated_input_is_bufferror_only_once_finish_is_requested()
    {
        let full = stored_block(b"Hello, World!");
        let truncated = &full[..full.len() - 2];

        let mut stream = InflateStream::new(15).unwrap();
        let mut out = [0u8; 64];

        let (status, _) = stream.step(truncated, &mut out, FlushMode::None).unwrap();
        assert_ne!(status, Status::StreamEnd);

        let (status, _) = stream.step(&[], &mut out, FlushMode::Finish).unwrap();
        assert_eq!(status, Status::BufError);
    }

    #[test]
    fn extra_trailing_byte_after_stream_end_is_not_consumed()
    {
        let mut input = stored_block(b"a");
        input.push(0xFF); // garbage trailing byte

        let mut stream = InflateStream::new(15).unwrap();
        let mut out = [0u8; 16];
        let (status, report) = stream.step(&input, &mut out, FlushMode::Finish).unwrap();

        assert_eq!(status, Status::StreamEnd);
        assert_eq!(report.in_consumed, input.len() - 1);
        assert_eq!(&out[..report.out_written], b"a");
    }

    #[test]
    fn data_error_poisons_the_stream()
    {
        let mut input = stored_block(b"x");
        input[0] = 0b111; // BFINAL=1, BTYPE=11 (reserved)

        let mut stream = InflateStream::new(15).unwrap();
        let mut out = [0u8; 16];

        assert!(stream.step(&input, &mut out, FlushMode::None).is_err());
        // Subsequent calls must also fail, without touching the cursors.
        assert!(stream.step(&input, &mut out, FlushMode::None).is_err());
    }
}
