use std::fmt::{Debug, Formatter};

/// A struct returned when one-shot decompression fails.
///
/// Mirrors the teacher crate's convention of reporting a terminal status
/// alongside whatever output was already produced before the failure, so
/// callers that only need "decode this whole buffer" don't have to give up
/// partial progress on a truncated stream.
pub struct InflateDecodeErrors
{
    /// reason why decompression fails
    pub error: DecodeErrorStatus,
    /// Decoded data up until that decompression error
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    /// Create a new decode wrapper with data being
    /// how many bytes we actually decoded before hitting an error
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }

    /// Create a new decode wrapper with an empty vector
    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, vec![])
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

/// The reason a stream failed to decode, shared by the one-shot API and the
/// resumable streaming facade.
///
/// A `CorruptData`/`Generic` value maps onto the streaming facade's
/// `DATA_ERROR` status; once returned by [`crate::stream::InflateStream::step`]
/// the stream is poisoned and every subsequent call returns the same value.
#[derive(Clone, PartialEq, Eq)]
pub enum DecodeErrorStatus
{
    /// Input data is not enough to construct
    /// a full output. Only returned by the one-shot API; the streaming
    /// facade reports the equivalent condition as `Status::BufError`
    /// instead, since it is not a format error.
    InsufficientData,
    /// A RFC 1951 format violation, with a short static description.
    Generic(&'static str),
    /// Same as `Generic`, for messages that needed to be built at runtime.
    GenericStr(String),
    /// A RFC 1951 format violation with no further detail.
    CorruptData,
    /// Limit set by the user was exceeded by
    /// decompressed output
    OutputLimitExceeded(usize, usize),
    /// Output CRC does not match stored CRC.
    ///
    /// Only present for gzip
    MismatchedCRC(u32, u32),
    /// Output Adler does not match stored adler
    ///
    /// Only present for zlib
    MismatchedAdler(u32, u32)
}

impl DecodeErrorStatus
{
    pub(crate) fn corrupt(reason: &'static str) -> Self
    {
        DecodeErrorStatus::Generic(reason)
    }
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::GenericStr(reason) => writeln!(f, "{reason}"),
            Self::CorruptData => writeln!(f, "Corrupt data"),
            Self::OutputLimitExceeded(limit, current) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {current}"
            ),
            Self::MismatchedCRC(expected, found) =>
            {
                writeln!(f, "Mismatched CRC, expected {expected} but found {found}")
            }
            Self::MismatchedAdler(expected, found) =>
            {
                writeln!(f, "Mismatched Adler, expected {expected} but found {found}")
            }
        }
    }
}

/// Outcome of a single [`crate::stream::InflateStream::step`] call that did
/// not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status
{
    /// Progress was made (input consumed and/or output emitted). Call
    /// `step` again to continue.
    Ok,
    /// The final block was fully decoded; no more bytes will ever be
    /// emitted by this stream.
    StreamEnd,
    /// No progress was possible: neither input nor output changed since the
    /// previous call. The caller must supply more input buffer, more
    /// output buffer, or (if `flush` signalled `Finish`) accept that the
    /// stream is truncated.
    BufError
}

/// Argument errors raised at stream construction time.
///
/// The historical C ABI this crate's lineage documents (see SPEC section 6)
/// also returns a `STREAM_ERROR` status from `step` for NULL arguments; Rust's
/// ownership and borrowing rules make that class of error unrepresentable
/// once a stream has been constructed, so it is only surfaced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError
{
    /// `window_bits.abs()` was outside the supported `[8, 15]` range.
    InvalidWindowBits(i8)
}

impl std::fmt::Display for StreamError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            StreamError::InvalidWindowBits(bits) =>
            {
                write!(f, "window bits {bits} outside the supported [8, 15] range")
            }
        }
    }
}

impl std::error::Error for StreamError {}
