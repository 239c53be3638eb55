/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A minimal stored-block ("no compression") DEFLATE encoder.
//!
//! This is not part of the public decompression surface: it exists purely
//! to generate RFC-1951-valid fixture streams for this crate's own test
//! suite, ported from the teacher crate's `DeflateEncoder::encode_no_compression`
//! (which built the same stored-block framing as a step on the way to a
//! full zlib-wrapped encoder). The zlib-wrapping and Adler-32 trailer
//! logic that accompanied it in the teacher crate is not retained: nothing
//! in this crate's decompression-only surface needs to produce compressed
//! *output*, let alone a container wrapper around it, so keeping that code
//! around to exercise would be dead weight (see DESIGN.md).

use crate::constants::DEFLATE_BLOCKTYPE_UNCOMPRESSED;

/// Encode `payload` as one or more RFC-1951 stored (uncompressed) blocks,
/// terminated by a block with BFINAL=1. Splits into multiple blocks if
/// `payload` exceeds `u16::MAX` bytes, exactly as the stored-block format
/// requires.
pub(crate) fn deflate_stored(payload: &[u8]) -> Vec<u8>
{
    let mut out = Vec::with_capacity(payload.len() + 5);

    if payload.is_empty()
    {
        out.push((1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1)) as u8);
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&u16::MAX.to_le_bytes());
        return out;
    }

    let mut pos = 0;
    while pos < payload.len()
    {
        let remaining = payload.len() - pos;
        let len = remaining.min(usize::from(u16::MAX));
        let bfinal = u8::from(len == remaining);

        out.push(bfinal | ((DEFLATE_BLOCKTYPE_UNCOMPRESSED as u8) << 1));
        out.extend_from_slice(&(len as u16).to_le_bytes());
        out.extend_from_slice(&(!(len as u16)).to_le_bytes());
        out.extend_from_slice(&payload[pos..pos + len]);

        pos += len;
    }

    out
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn empty_payload_encodes_to_a_single_zero_length_final_block()
    {
        let encoded = deflate_stored(b"");
        assert_eq!(encoded, vec![0x01, 0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn nonempty_payload_round_trips_through_the_decoder()
    {
        use crate::oneshot::decode_deflate;

        let payload = b"abcde";
        let encoded = deflate_stored(payload);
        assert_eq!(decode_deflate(&encoded).unwrap(), payload);
    }
}
