//! Canonical Huffman table construction and resumable decode.
//!
//! The construction half follows RFC 1951 section 3.2.2 (`bl_count` /
//! `next_code`) exactly as the teacher crate's `build_decode_table` does.
//! The decode half deliberately does *not* port the teacher's length-limited
//! direct-lookup table with chained sub-tables: that shape assumes the whole
//! compressed buffer is resident and can be over-read past its true end,
//! which the teacher's own `decoder.rs` never finished adapting to a
//! resumable, chunked cursor. Decoding bit-by-bit (the classic canonical
//! reference algorithm, as in zlib's `contrib/puff/puff.c`) consumes exactly
//! as many real bits as a codeword needs and suspends cleanly between any
//! two bits, which is what a streaming `step()` requires. Both shapes are
//! explicitly sanctioned as equivalent by the spec this crate implements.

use crate::bitstream::BitReader;
use crate::errors::DecodeErrorStatus;

/// Largest codeword length any DEFLATE Huffman code may use.
pub(crate) const MAX_BITS: usize = 15;

/// A canonical Huffman code, ready for symbol-at-a-time decode.
#[derive(Clone, Debug, Default)]
pub(crate) struct HuffmanTable
{
    /// `counts[len]` = number of symbols assigned codeword length `len`.
    counts:  [u16; MAX_BITS + 1],
    /// Symbols sorted by (codeword length, symbol value), matching the
    /// order codes are assigned in. Indexed via `counts`-derived offsets.
    symbols: Vec<u16>,
    /// Degenerate one-codeword table (RFC 1951's single-symbol-length-1
    /// exception). When set, `decode_step` always returns this symbol after
    /// consuming exactly one bit, regardless of its value — the same
    /// convention zlib and libdeflate use to avoid treating a stray `1` bit
    /// as invalid.
    single_symbol: Option<u16>
}

/// Progress of an in-flight symbol decode, preserved across `step()`
/// suspension points.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PartialDecode
{
    code:  i32,
    first: i32,
    index: i32,
    len:   u8
}

impl HuffmanTable
{
    /// Build a canonical Huffman table from a per-symbol code-length array.
    /// `lens[i] == 0` means symbol `i` is absent from the code.
    pub(crate) fn build(lens: &[u8]) -> Result<Self, DecodeErrorStatus>
    {
        let mut counts = [0u16; MAX_BITS + 1];

        for &len in lens
        {
            if len as usize > MAX_BITS
            {
                return Err(DecodeErrorStatus::corrupt("codeword length exceeds 15 bits"));
            }
            counts[len as usize] += 1;
        }

        let num_codes = lens.len() - counts[0] as usize;

        if num_codes == 0
        {
            // No symbols at all: a valid degenerate table (e.g. a dynamic
            // block whose distance alphabet is never actually used), but
            // any attempt to decode from it is malformed input.
            return Ok(HuffmanTable { counts, symbols: Vec::new(), single_symbol: None });
        }

        // Determine whether the lengths form a complete, over-subscribed,
        // or incomplete code (RFC 1951's `left` bookkeeping, ported
        // verbatim from the canonical reference construction).
        let mut left: i32 = 1;
        for len in 1..=MAX_BITS
        {
            left <<= 1;
            left -= i32::from(counts[len]);
            if left < 0
            {
                return Err(DecodeErrorStatus::corrupt("over-subscribed Huffman code"));
            }
        }

        if left > 0
        {
            // Incomplete code. RFC 1951 only blesses one such case: exactly
            // one symbol, with codeword length 1.
            if num_codes == 1 && counts[1] == 1
            {
                let single = lens.iter().position(|&l| l == 1).unwrap() as u16;
                return Ok(HuffmanTable { counts, symbols: Vec::new(), single_symbol: Some(single) });
            }
            return Err(DecodeErrorStatus::corrupt("incomplete Huffman code"));
        }

        // Complete code: sort symbols by (length, symbol value) into a flat
        // vector, using cumulative counts as insertion offsets.
        let mut offsets = [0u16; MAX_BITS + 2];
        for len in 1..MAX_BITS
        {
            offsets[len + 1] = offsets[len] + counts[len];
        }

        let mut symbols = vec![0u16; num_codes];
        for (sym, &len) in lens.iter().enumerate()
        {
            if len != 0
            {
                let pos = usize::from(len);
                symbols[offsets[pos] as usize] = sym as u16;
                offsets[pos] += 1;
            }
        }

        Ok(HuffmanTable { counts, symbols, single_symbol: None })
    }

    /// Advance a symbol decode by as many bits as `bit` currently has on
    /// hand.
    ///
    /// Returns `Ok(Some(symbol))` once a full codeword resolves,
    /// `Ok(None)` if `bit` ran out of bits before that (the caller should
    /// refill from its input cursor and call again — `partial` preserves
    /// exactly how far the codeword walk had gotten), or `Err` if the bits
    /// consumed so far cannot possibly form a valid codeword.
    pub(crate) fn decode_step(
        &self, bit: &mut BitReader, partial: &mut PartialDecode
    ) -> Result<Option<u16>, DecodeErrorStatus>
    {
        if let Some(sym) = self.single_symbol
        {
            if bit.bits_left() == 0
            {
                return Ok(None);
            }
            bit.drop_bits(1);
            return Ok(Some(sym));
        }

        if self.symbols.is_empty()
        {
            return Err(DecodeErrorStatus::corrupt("decode attempted against an empty Huffman table"));
        }

        while bit.bits_left() > 0
        {
            let next_bit = bit.get_bits(1) as i32;

            partial.code |= next_bit;
            partial.len += 1;

            let count = i32::from(self.counts[partial.len as usize]);

            if partial.code - partial.first < count
            {
                let symbol = self.symbols[(partial.index + (partial.code - partial.first)) as usize];
                *partial = PartialDecode::default();
                return Ok(Some(symbol));
            }

            partial.index += count;
            partial.first += count;
            partial.first <<= 1;
            partial.code <<= 1;

            if partial.len as usize == MAX_BITS
            {
                *partial = PartialDecode::default();
                return Err(DecodeErrorStatus::corrupt("no codeword matched within 15 bits"));
            }
        }

        Ok(None)
    }
}
