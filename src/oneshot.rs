//! One-shot convenience entry points for callers that already hold the
//! whole compressed buffer in memory, layered on top of [`InflateStream`]
//! the same way the teacher crate's `decode_zlib` layers on top of
//! `decode_deflate`: parse/sniff whatever container wrapper applies, then
//! drive the streaming core to completion against a scratch buffer.

use crate::container;
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors, Status};
use crate::options::DeflateOptions;
use crate::stream::{FlushMode, InflateStream};

/// Size of the scratch buffer `step` is called against per iteration. Not
/// a limit on total output: the accumulated `Vec` grows without bound
/// (unless [`DeflateOptions::set_limit`] says otherwise).
const SCRATCH_SIZE: usize = 32 * 1024;

fn new_stream(window_bits: i8) -> Result<InflateStream, InflateDecodeErrors>
{
    InflateStream::new(window_bits).map_err(|e| {
        InflateDecodeErrors::new_with_error(DecodeErrorStatus::GenericStr(e.to_string()))
    })
}

/// Drive `stream` to completion against `input`, returning the decoded
/// bytes and how many bytes of `input` were consumed by the embedded
/// DEFLATE stream (i.e. the offset of whatever trailer follows it, for
/// callers that have one).
fn run_to_completion(
    mut stream: InflateStream, input: &[u8], options: &DeflateOptions
) -> Result<(Vec<u8>, usize), InflateDecodeErrors>
{
    let mut out = Vec::with_capacity(options.get_size_hint().unwrap_or_else(|| input.len() * 3));
    let mut consumed = 0usize;
    let mut scratch = vec![0u8; SCRATCH_SIZE];

    loop
    {
        let (status, report) = stream
            .step(&input[consumed..], &mut scratch, FlushMode::Finish)
            .map_err(|e| InflateDecodeErrors::new(e, out.clone()))?;

        consumed += report.in_consumed;
        out.extend_from_slice(&scratch[..report.out_written]);

        if let Some(limit) = options.get_limit()
        {
            if out.len() > limit
            {
                return Err(InflateDecodeErrors::new(
                    DecodeErrorStatus::OutputLimitExceeded(limit, out.len()),
                    out
                ));
            }
        }

        match status
        {
            Status::StreamEnd => return Ok((out, consumed)),
            Status::Ok => continue,
            Status::BufError =>
            {
                return Err(InflateDecodeErrors::new(DecodeErrorStatus::InsufficientData, out));
            }
        }
    }
}

/// Decode a raw RFC 1951 DEFLATE stream (no zlib or gzip wrapper) held
/// entirely in memory.
pub fn decode_deflate(data: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
{
    decode_deflate_with_options(data, DeflateOptions::default())
}

/// As [`decode_deflate`], with explicit [`DeflateOptions`].
pub fn decode_deflate_with_options(
    data: &[u8], options: DeflateOptions
) -> Result<Vec<u8>, InflateDecodeErrors>
{
    let stream = new_stream(options.get_window_bits())?;
    let (out, _) = run_to_completion(stream, data, &options)?;
    Ok(out)
}

/// Decode a zlib-wrapped (RFC 1950) DEFLATE stream: validates the 2-byte
/// header, decodes the embedded raw DEFLATE stream, and (unless disabled
/// via [`DeflateOptions::set_confirm_checksum`]) verifies the trailing
/// Adler-32 checksum.
#[cfg(feature = "zlib")]
pub fn decode_zlib(data: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
{
    decode_zlib_with_options(data, DeflateOptions::default())
}

#[cfg(feature = "zlib")]
pub fn decode_zlib_with_options(
    data: &[u8], options: DeflateOptions
) -> Result<Vec<u8>, InflateDecodeErrors>
{
    let (header, offset) =
        container::parse_zlib_header(data).map_err(InflateDecodeErrors::new_with_error)?;

    let stream = new_stream(header.window_bits as i8)?;
    let (out, consumed) = run_to_completion(stream, &data[offset..], &options)?;

    if options.get_confirm_checksum()
    {
        let trailer_start = offset + consumed;
        let trailer = data
            .get(trailer_start..trailer_start + 4)
            .ok_or_else(|| InflateDecodeErrors::new(DecodeErrorStatus::InsufficientData, out.clone()))?;
        let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let found = container::adler32(&out);
        if expected != found
        {
            return Err(InflateDecodeErrors::new(
                DecodeErrorStatus::MismatchedAdler(expected, found),
                out
            ));
        }
    }

    Ok(out)
}

/// Decode a gzip-wrapped (RFC 1952) DEFLATE stream: sniffs the member
/// header (including optional extra/name/comment/hcrc fields), decodes the
/// embedded raw DEFLATE stream, and (unless disabled) verifies the
/// trailing CRC-32 and ISIZE fields.
#[cfg(feature = "gzip")]
pub fn decode_gzip(data: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
{
    decode_gzip_with_options(data, DeflateOptions::default())
}

#[cfg(feature = "gzip")]
pub fn decode_gzip_with_options(
    data: &[u8], options: DeflateOptions
) -> Result<Vec<u8>, InflateDecodeErrors>
{
    let offset =
        container::parse_gzip_header(data).map_err(InflateDecodeErrors::new_with_error)?;

    // gzip's window is implicitly the full 32K; the header carries no
    // window-bits field of its own, unlike zlib's CINFO.
    let stream = new_stream(15)?;
    let (out, consumed) = run_to_completion(stream, &data[offset..], &options)?;

    if options.get_confirm_checksum()
    {
        let trailer_start = offset + consumed;
        let trailer = data
            .get(trailer_start..)
            .ok_or_else(|| InflateDecodeErrors::new(DecodeErrorStatus::InsufficientData, out.clone()))?;
        let (expected_crc, expected_isize) =
            container::parse_gzip_trailer(trailer).map_err(|e| InflateDecodeErrors::new(e, out.clone()))?;

        let found_crc = container::crc32(&out);
        if expected_crc != found_crc
        {
            return Err(InflateDecodeErrors::new(
                DecodeErrorStatus::MismatchedCRC(expected_crc, found_crc),
                out
            ));
        }

        let found_isize = out.len() as u32;
        if expected_isize != found_isize
        {
            return Err(InflateDecodeErrors::new(
                DecodeErrorStatus::GenericStr(format!(
                    "gzip ISIZE mismatch: header says {expected_isize}, decoded {found_isize} bytes"
                )),
                out
            ));
        }
    }

    Ok(out)
}
