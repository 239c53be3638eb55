//! zlib (RFC 1950) and gzip (RFC 1952) container sniffing and checksum
//! verification, layered on top of the raw DEFLATE engine the same way the
//! teacher crate's `decode_zlib` layers on top of `decode_deflate`.

use crate::errors::DecodeErrorStatus;

/// Parsed zlib header (RFC 1950 section 2.2): `CMF` followed by `FLG`.
#[cfg(feature = "zlib")]
pub(crate) struct ZlibHeader
{
    pub(crate) window_bits: u8
}

#[cfg(feature = "zlib")]
pub(crate) fn parse_zlib_header(data: &[u8]) -> Result<(ZlibHeader, usize), DecodeErrorStatus>
{
    if data.len() < 2
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let cmf = data[0];
    let flg = data[1];

    if (u16::from(cmf) * 256 + u16::from(flg)) % 31 != 0
    {
        return Err(DecodeErrorStatus::corrupt("zlib header check bits (FCHECK) do not validate"));
    }

    let compression_method = cmf & 0x0F;
    if compression_method != 8
    {
        return Err(DecodeErrorStatus::corrupt("zlib CM field is not 8 (DEFLATE)"));
    }

    let cinfo = cmf >> 4;
    if cinfo > 7
    {
        return Err(DecodeErrorStatus::corrupt("zlib CINFO exceeds the maximum window size"));
    }
    let window_bits = cinfo + 8;

    let fdict = (flg >> 5) & 1;
    if fdict != 0
    {
        return Err(DecodeErrorStatus::Generic(
            "zlib streams with a preset dictionary (FDICT) are not supported"
        ));
    }

    Ok((ZlibHeader { window_bits }, 2))
}

#[cfg(feature = "zlib")]
pub(crate) fn adler32(data: &[u8]) -> u32
{
    use std::hash::Hasher;
    let mut hasher = simd_adler32::Adler32::new();
    hasher.write(data);
    hasher.finish() as u32
}

/// gzip magic bytes (RFC 1952 section 2.3.1).
#[cfg(feature = "gzip")]
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[cfg(feature = "gzip")]
const FLG_FTEXT: u8 = 1 << 0;
#[cfg(feature = "gzip")]
const FLG_FHCRC: u8 = 1 << 1;
#[cfg(feature = "gzip")]
const FLG_FEXTRA: u8 = 1 << 2;
#[cfg(feature = "gzip")]
const FLG_FNAME: u8 = 1 << 3;
#[cfg(feature = "gzip")]
const FLG_FCOMMENT: u8 = 1 << 4;

/// Parse a gzip member header, returning how many bytes it occupied.
/// `FTEXT` and the embedded mtime/XFL/OS fields are not surfaced: nothing
/// in this crate's decoding path depends on them, matching the spec's
/// choice to treat gzip support as "unwrap the DEFLATE stream and verify
/// the trailer", not a full gzip metadata reader.
#[cfg(feature = "gzip")]
pub(crate) fn parse_gzip_header(data: &[u8]) -> Result<usize, DecodeErrorStatus>
{
    if data.len() < 10
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    if data[0..2] != GZIP_MAGIC
    {
        return Err(DecodeErrorStatus::corrupt("gzip magic bytes (1f 8b) not found"));
    }
    if data[2] != 8
    {
        return Err(DecodeErrorStatus::corrupt("gzip CM field is not 8 (DEFLATE)"));
    }

    let flg = data[3];
    let mut pos = 10;

    if flg & FLG_FEXTRA != 0
    {
        if data.len() < pos + 2
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let xlen = u16::from_le_bytes([data[pos], data[pos + 1]]) as usize;
        pos += 2 + xlen;
    }

    if flg & FLG_FNAME != 0
    {
        pos += find_nul(data, pos)?;
    }

    if flg & FLG_FCOMMENT != 0
    {
        pos += find_nul(data, pos)?;
    }

    if flg & FLG_FHCRC != 0
    {
        pos += 2;
    }

    if data.len() < pos
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    Ok(pos)
}

#[cfg(feature = "gzip")]
fn find_nul(data: &[u8], start: usize) -> Result<usize, DecodeErrorStatus>
{
    let tail = data.get(start..).ok_or(DecodeErrorStatus::InsufficientData)?;
    let nul = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeErrorStatus::InsufficientData)?;
    Ok(nul + 1)
}

/// The 8-byte gzip trailer: little-endian CRC-32 then little-endian ISIZE
/// (uncompressed size modulo 2^32).
#[cfg(feature = "gzip")]
pub(crate) fn parse_gzip_trailer(data: &[u8]) -> Result<(u32, u32), DecodeErrorStatus>
{
    if data.len() < 8
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }
    let crc = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let isize = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    Ok((crc, isize))
}

#[cfg(feature = "gzip")]
pub(crate) fn crc32(data: &[u8]) -> u32
{
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_header_with_valid_fcheck_parses_window_bits()
    {
        // CMF = 0x78 (CM=8, CINFO=7 -> 32K window), FLG chosen so the
        // 16-bit big-endian value is a multiple of 31.
        let cmf = 0x78u8;
        let mut flg = 0u8;
        while (u16::from(cmf) * 256 + u16::from(flg)) % 31 != 0
        {
            flg += 1;
        }
        let data = [cmf, flg];
        let (header, consumed) = parse_zlib_header(&data).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(header.window_bits, 15);
    }

    #[cfg(feature = "zlib")]
    #[test]
    fn zlib_header_with_bad_fcheck_is_rejected()
    {
        let data = [0x78u8, 0x00u8];
        assert!(parse_zlib_header(&data).is_err());
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn gzip_header_with_no_optional_fields_is_ten_bytes()
    {
        let data = [0x1f, 0x8b, 8, 0, 0, 0, 0, 0, 0, 0xff];
        assert_eq!(parse_gzip_header(&data).unwrap(), 10);
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn gzip_header_with_fname_consumes_through_nul()
    {
        let mut data = vec![0x1f, 0x8b, 8, FLG_FNAME, 0, 0, 0, 0, 0, 0xff];
        data.extend_from_slice(b"file.txt\0");
        assert_eq!(parse_gzip_header(&data).unwrap(), 10 + 9);
    }
}
