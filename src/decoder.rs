//! The incremental inflate engine: bit reader, Huffman construction, block
//! decoding, and window management, all modeled as a resumable state
//! machine so a single `step()` call is safe to make with any-sized input
//! and output buffers.
//!
//! This replaces the teacher crate's `decoder.rs`, which never got past a
//! single `DeflateState::Initialized` variant and a `todo!()` for the
//! symbol-decoding fastloop: this module is the completed, resumable
//! version of that same idea, built the way the teacher's own
//! `build_decode_table` comments describe the *intended* shape.

use crate::bitstream::{BitReader, InCursor, OutCursor};
use crate::constants::{
    DEFLATE_NUM_PRECODE_SYMS, DIST_BASE, DIST_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS, MAX_LENS,
    DEFLATE_PRECODE_LENS_PERMUTATION
};
use crate::errors::DecodeErrorStatus;
use crate::huffman::{HuffmanTable, PartialDecode};
use crate::window::Window;

const BTYPE_UNCOMPRESSED: u64 = 0;
const BTYPE_FIXED: u64 = 1;
const BTYPE_DYNAMIC: u64 = 2;
const BTYPE_RESERVED: u64 = 3;

/// A pending RLE repeat (code-length symbol 16/17/18) that has been
/// decoded but whose extra-bits count has not been read yet.
#[derive(Clone, Copy, Debug)]
struct PendingRepeat
{
    presym:   u8,
    prev_len: u8
}

#[derive(Clone, Copy, Debug)]
enum State
{
    BlockHeader,
    StoredHeader,
    StoredCopying { remaining: usize },
    DynCounts,
    DynPrecodeLens { idx: usize },
    DynCodeLengths { idx: usize, partial: PartialDecode, repeat: Option<PendingRepeat> },
    SymNeedSymbol { partial: PartialDecode },
    SymHaveLength { length_base: u16, extra_bits: u8 },
    SymNeedDistSymbol { length: u16, partial: PartialDecode },
    SymHaveDist { length: u16, dist_base: u16, extra_bits: u8 },
    SymCopyingMatch { remaining: u16, distance: usize },
    Done
}

/// What a single `step()` call must report back to the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome
{
    /// The input cursor was exhausted before any further progress could be
    /// made this call.
    NeedInput,
    /// The output cursor was exhausted before any further progress could
    /// be made this call.
    NeedOutput,
    /// The final block's end-of-block symbol was consumed; no more bytes
    /// will ever be produced.
    StreamEnd
}

/// The resumable core DEFLATE engine.
pub(crate) struct Decoder
{
    bit:   BitReader,
    state: State,
    final_block: bool,

    /// A literal byte that was fully decoded (its Huffman bits already
    /// consumed) but could not be pushed because the output cursor was
    /// full. Re-decoding it on the next call would double-consume input,
    /// so it is stashed here instead.
    pending_literal: Option<u8>,

    window: Window,

    litlen_table: Option<HuffmanTable>,
    dist_table:   Option<HuffmanTable>,
    fixed_tables: Option<(HuffmanTable, HuffmanTable)>,

    precode_lens:  [u8; DEFLATE_NUM_PRECODE_SYMS],
    precode_table: Option<HuffmanTable>,

    hlit:  usize,
    hdist: usize,
    hclen: usize,
    lens:  Vec<u8>
}

impl Decoder
{
    pub(crate) fn new(window_bits: u8) -> Self
    {
        Decoder {
            bit: BitReader::new(),
            state: State::BlockHeader,
            final_block: false,
            pending_literal: None,
            window: Window::new(window_bits),
            litlen_table: None,
            dist_table: None,
            fixed_tables: None,
            precode_lens: [0; DEFLATE_NUM_PRECODE_SYMS],
            precode_table: None,
            hlit: 0,
            hdist: 0,
            hclen: 0,
            lens: Vec::with_capacity(MAX_LENS)
        }
    }

    pub(crate) fn bytes_emitted(&self) -> u64
    {
        self.window.total_pushed()
    }

    fn ensure_fixed_tables(&mut self) -> Result<(), DecodeErrorStatus>
    {
        if self.fixed_tables.is_none()
        {
            let litlen = HuffmanTable::build(&crate::constants::fixed_litlen_lengths())?;
            let dist = HuffmanTable::build(&crate::constants::fixed_dist_lengths())?;
            self.fixed_tables = Some((litlen, dist));
        }
        Ok(())
    }

    /// Drive the state machine as far forward as `input`/`output` allow.
    ///
    /// Returns the reason decoding stopped, plus whether *any* progress was
    /// made (bits consumed, bytes emitted, or a bare state transition using
    /// bits already buffered from an earlier call). The facade uses that
    /// flag to decide between `Ok` and `BufError` without re-deriving it
    /// from cursor deltas, since a transition can legitimately happen using
    /// only already-buffered bits.
    pub(crate) fn step(
        &mut self, input: &mut InCursor, output: &mut OutCursor
    ) -> Result<(StepOutcome, bool), DecodeErrorStatus>
    {
        let mut progress = false;

        loop
        {
            if let Some(byte) = self.pending_literal
            {
                if output.remaining() == 0
                {
                    return Ok((StepOutcome::NeedOutput, progress));
                }
                output.push(byte);
                self.window.push(byte);
                self.pending_literal = None;
                progress = true;
                continue;
            }

            match self.state
            {
                State::Done => return Ok((StepOutcome::StreamEnd, progress)),

                State::BlockHeader =>
                {
                    match self.bit.try_get_bits(3, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(bits) =>
                        {
                            progress = true;
                            let final_block = (bits & 1) == 1;
                            let btype = (bits >> 1) & 0b11;

                            self.final_block = final_block;

                            match btype
                            {
                                BTYPE_UNCOMPRESSED =>
                                {
                                    self.state = State::StoredHeader;
                                }
                                BTYPE_FIXED =>
                                {
                                    self.ensure_fixed_tables()?;
                                    let (litlen, dist) = self.fixed_tables.clone().unwrap();
                                    self.litlen_table = Some(litlen);
                                    self.dist_table = Some(dist);
                                    self.state = State::SymNeedSymbol { partial: PartialDecode::default() };
                                }
                                BTYPE_DYNAMIC =>
                                {
                                    self.precode_lens = [0; DEFLATE_NUM_PRECODE_SYMS];
                                    self.state = State::DynCounts;
                                }
                                BTYPE_RESERVED =>
                                {
                                    return Err(DecodeErrorStatus::corrupt("reserved block type (BTYPE == 3)"));
                                }
                                _ => unreachable!("BTYPE is masked to 2 bits")
                            }
                        }
                    }
                }

                State::StoredHeader =>
                {
                    self.bit.align_to_byte();
                    match self.bit.try_get_bits(32, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(bits) =>
                        {
                            progress = true;
                            let len = (bits & 0xFFFF) as u16;
                            let nlen = ((bits >> 16) & 0xFFFF) as u16;
                            if len != !nlen
                            {
                                return Err(DecodeErrorStatus::corrupt("stored block LEN/NLEN mismatch"));
                            }
                            self.state = State::StoredCopying { remaining: usize::from(len) };
                        }
                    }
                }

                State::StoredCopying { mut remaining } =>
                {
                    // Drain whole bytes still sitting in the bit accumulator
                    // first: they were already pulled out of `input`, so
                    // they must be written before falling back to a direct
                    // slice copy from the input cursor.
                    while remaining > 0 && self.bit.bits_left() >= 8
                    {
                        if output.remaining() == 0
                        {
                            self.state = State::StoredCopying { remaining };
                            return Ok((StepOutcome::NeedOutput, progress));
                        }
                        let byte = self.bit.take_buffered_byte().unwrap();
                        output.push(byte);
                        self.window.push(byte);
                        remaining -= 1;
                        progress = true;
                    }

                    while remaining > 0
                    {
                        if output.remaining() == 0
                        {
                            self.state = State::StoredCopying { remaining };
                            return Ok((StepOutcome::NeedOutput, progress));
                        }
                        if input.remaining() == 0
                        {
                            self.state = State::StoredCopying { remaining };
                            return Ok((StepOutcome::NeedInput, progress));
                        }
                        let n = remaining.min(output.remaining()).min(input.remaining());
                        let bytes = input.take_slice(n).unwrap();
                        let written = output.push_slice(bytes);
                        debug_assert_eq!(written, n);
                        self.window.push_slice(bytes);
                        remaining -= n;
                        progress = true;
                    }

                    self.state = State::BlockHeader;
                }

                State::DynCounts =>
                {
                    match self.bit.try_get_bits(14, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(bits) =>
                        {
                            progress = true;
                            self.hlit = 257 + (bits & 0x1F) as usize;
                            self.hdist = 1 + ((bits >> 5) & 0x1F) as usize;
                            self.hclen = 4 + ((bits >> 10) & 0x0F) as usize;

                            self.lens.clear();
                            self.lens.resize(self.hlit + self.hdist, 0);
                            self.state = State::DynPrecodeLens { idx: 0 };
                        }
                    }
                }

                State::DynPrecodeLens { idx } =>
                {
                    if idx == self.hclen
                    {
                        self.precode_table = Some(HuffmanTable::build(&self.precode_lens)?);
                        progress = true;
                        self.state = State::DynCodeLengths {
                            idx:    0,
                            partial: PartialDecode::default(),
                            repeat: None
                        };
                        continue;
                    }
                    match self.bit.try_get_bits(3, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(bits) =>
                        {
                            progress = true;
                            let position = usize::from(DEFLATE_PRECODE_LENS_PERMUTATION[idx]);
                            self.precode_lens[position] = bits as u8;
                            self.state = State::DynPrecodeLens { idx: idx + 1 };
                        }
                    }
                }

                State::DynCodeLengths { idx, mut partial, repeat } =>
                {
                    let total = self.hlit + self.hdist;

                    if idx >= total
                    {
                        let litlen_lens = &self.lens[..self.hlit];
                        let dist_lens = &self.lens[self.hlit..];
                        self.litlen_table = Some(HuffmanTable::build(litlen_lens)?);
                        self.dist_table = Some(HuffmanTable::build(dist_lens)?);
                        progress = true;
                        self.state = State::SymNeedSymbol { partial: PartialDecode::default() };
                        continue;
                    }

                    if let Some(pending) = repeat
                    {
                        let (extra_bits, base_count) = match pending.presym
                        {
                            16 => (2u8, 3usize),
                            17 => (3u8, 3usize),
                            18 => (7u8, 11usize),
                            _ => unreachable!("only 16/17/18 are ever queued as a pending repeat")
                        };
                        match self.bit.try_get_bits(extra_bits, input)
                        {
                            None => return Ok((StepOutcome::NeedInput, progress)),
                            Some(extra) =>
                            {
                                progress = true;
                                let count = base_count + extra as usize;
                                if idx + count > total
                                {
                                    return Err(DecodeErrorStatus::corrupt(
                                        "repeat code overflows HLIT + HDIST"
                                    ));
                                }
                                self.lens[idx..idx + count].fill(pending.prev_len);
                                self.state = State::DynCodeLengths {
                                    idx:    idx + count,
                                    partial: PartialDecode::default(),
                                    repeat: None
                                };
                            }
                        }
                        continue;
                    }

                    self.bit.refill(input);
                    let table = self.precode_table.as_ref().unwrap();
                    match table.decode_step(&mut self.bit, &mut partial)?
                    {
                        None =>
                        {
                            self.state = State::DynCodeLengths { idx, partial, repeat: None };
                            return Ok((StepOutcome::NeedInput, progress));
                        }
                        Some(presym) =>
                        {
                            progress = true;
                            if presym < 16
                            {
                                self.lens[idx] = presym as u8;
                                self.state = State::DynCodeLengths {
                                    idx:    idx + 1,
                                    partial: PartialDecode::default(),
                                    repeat: None
                                };
                            }
                            else if presym == 16
                            {
                                if idx == 0
                                {
                                    return Err(DecodeErrorStatus::corrupt(
                                        "repeat-previous code length with no previous entry"
                                    ));
                                }
                                let prev_len = self.lens[idx - 1];
                                self.state = State::DynCodeLengths {
                                    idx,
                                    partial: PartialDecode::default(),
                                    repeat: Some(PendingRepeat { presym: 16, prev_len })
                                };
                            }
                            else if presym == 17 || presym == 18
                            {
                                self.state = State::DynCodeLengths {
                                    idx,
                                    partial: PartialDecode::default(),
                                    repeat: Some(PendingRepeat { presym: presym as u8, prev_len: 0 })
                                };
                            }
                            else
                            {
                                return Err(DecodeErrorStatus::corrupt("invalid code-length symbol"));
                            }
                        }
                    }
                }

                State::SymNeedSymbol { mut partial } =>
                {
                    self.bit.refill(input);
                    let table = self.litlen_table.as_ref().unwrap();
                    match table.decode_step(&mut self.bit, &mut partial)?
                    {
                        None =>
                        {
                            self.state = State::SymNeedSymbol { partial };
                            return Ok((StepOutcome::NeedInput, progress));
                        }
                        Some(sym) =>
                        {
                            progress = true;
                            if sym < 256
                            {
                                // The codeword is fully consumed regardless of
                                // whether output has room; a blocked push is
                                // deferred to `pending_literal` so this symbol
                                // is never re-decoded on resumption.
                                self.state = State::SymNeedSymbol { partial: PartialDecode::default() };
                                self.pending_literal = Some(sym as u8);
                            }
                            else if sym == 256
                            {
                                if self.final_block
                                {
                                    self.state = State::Done;
                                    return Ok((StepOutcome::StreamEnd, progress));
                                }
                                self.state = State::BlockHeader;
                            }
                            else if sym <= 285
                            {
                                let i = (sym - 257) as usize;
                                self.state = State::SymHaveLength {
                                    length_base: LENGTH_BASE[i],
                                    extra_bits:  LENGTH_EXTRA_BITS[i]
                                };
                            }
                            else
                            {
                                return Err(DecodeErrorStatus::corrupt("literal/length symbol > 285"));
                            }
                        }
                    }
                }

                State::SymHaveLength { length_base, extra_bits } =>
                {
                    match self.bit.try_get_bits(extra_bits, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(extra) =>
                        {
                            progress = true;
                            let length = length_base + extra as u16;
                            self.state = State::SymNeedDistSymbol {
                                length,
                                partial: PartialDecode::default()
                            };
                        }
                    }
                }

                State::SymNeedDistSymbol { length, mut partial } =>
                {
                    self.bit.refill(input);
                    let table = self.dist_table.as_ref().unwrap();
                    match table.decode_step(&mut self.bit, &mut partial)?
                    {
                        None =>
                        {
                            self.state = State::SymNeedDistSymbol { length, partial };
                            return Ok((StepOutcome::NeedInput, progress));
                        }
                        Some(d) =>
                        {
                            progress = true;
                            if d as usize >= DIST_BASE.len()
                            {
                                return Err(DecodeErrorStatus::corrupt("distance symbol >= 30"));
                            }
                            self.state = State::SymHaveDist {
                                length,
                                dist_base:  DIST_BASE[d as usize],
                                extra_bits: DIST_EXTRA_BITS[d as usize]
                            };
                        }
                    }
                }

                State::SymHaveDist { length, dist_base, extra_bits } =>
                {
                    match self.bit.try_get_bits(extra_bits, input)
                    {
                        None => return Ok((StepOutcome::NeedInput, progress)),
                        Some(extra) =>
                        {
                            progress = true;
                            let distance = usize::from(dist_base) + extra as usize;
                            self.window.check_distance(distance)?;
                            self.state = State::SymCopyingMatch { remaining: length, distance };
                        }
                    }
                }

                State::SymCopyingMatch { mut remaining, distance } =>
                {
                    while remaining > 0
                    {
                        if output.remaining() == 0
                        {
                            self.state = State::SymCopyingMatch { remaining, distance };
                            return Ok((StepOutcome::NeedOutput, progress));
                        }
                        let byte = self.window.byte_at_distance(distance);
                        output.push(byte);
                        self.window.push(byte);
                        remaining -= 1;
                        progress = true;
                    }

                    self.state = State::SymNeedSymbol { partial: PartialDecode::default() };
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
    fn stored_block_decodes_in_one_call()
    {
        let input = stored_block(b"abcde");
        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 16];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        let (outcome, progress) = decoder.step(&mut in_cursor, &mut out_cursor).unwrap();
        assert_eq!(outcome, StepOutcome::StreamEnd);
        assert!(progress);
        assert_eq!(&out_buf[..out_cursor.written()], b"abcde");
    }

    #[test]
    fn stored_block_resumes_across_one_byte_at_a_time_input()
    {
        let input = stored_block(b"hello");
        let mut decoder = Decoder::new(15);
        let mut produced = Vec::new();
        let mut pos = 0;

        loop
        {
            let chunk = &input[pos..(pos + 1).min(input.len())];
            pos += chunk.len();
            let mut in_cursor = InCursor::new(chunk);
            let mut out_buf = [0u8; 16];
            let mut out_cursor = OutCursor::new(&mut out_buf);

            match decoder.step(&mut in_cursor, &mut out_cursor)
            {
                Ok((StepOutcome::StreamEnd, _)) =>
                {
                    produced.extend_from_slice(&out_buf[..out_cursor.written()]);
                    break;
                }
                Ok((_, _)) =>
                {
                    produced.extend_from_slice(&out_buf[..out_cursor.written()]);
                }
                Err(e) => panic!("unexpected decode error: {e:?}")
            }
        }

        assert_eq!(produced, b"hello");
    }

    /// Append `len` bits of `value` in the order DEFLATE transmits a
    /// fixed-width field: least-significant bit first.
    fn push_lsb(bits: &mut Vec<bool>, value: u64, len: u8)
    {
        for i in 0..len
        {
            bits.push((value >> i) & 1 == 1);
        }
    }

    /// Append `len` bits of `value` in the order DEFLATE transmits a
    /// Huffman codeword: most-significant bit first (RFC 1951 section
    /// 3.2.2).
    fn push_msb(bits: &mut Vec<bool>, value: u64, len: u8)
    {
        for i in (0..len).rev()
        {
            bits.push((value >> i) & 1 == 1);
        }
    }

    /// Pack a transmission-order bit sequence into bytes, least-significant
    /// bit of each byte first, matching how [`BitReader`] assembles bytes
    /// pulled from an [`InCursor`].
    fn pack_bits(bits: &[bool]) -> Vec<u8>
    {
        let mut out = vec![0u8; (bits.len() + 7) / 8];
        for (i, &bit) in bits.iter().enumerate()
        {
            if bit
            {
                out[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }

    #[test]
    fn fixed_huffman_block_of_literals_decodes()
    {
        let mut bits = Vec::new();
        push_lsb(&mut bits, 1, 1); // BFINAL = 1
        push_lsb(&mut bits, 0b01, 2); // BTYPE = fixed Huffman

        // Fixed literal codes for values < 144 are `0b0011_0000 + value`,
        // 8 bits, per RFC 1951 section 3.2.6.
        for &byte in b"cab"
        {
            push_msb(&mut bits, 0b0011_0000 + u64::from(byte), 8);
        }
        push_msb(&mut bits, 0, 7); // end-of-block (symbol 256, 7-bit code 0)

        let input = pack_bits(&bits);
        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        let (outcome, _) = decoder.step(&mut in_cursor, &mut out_cursor).unwrap();
        assert_eq!(outcome, StepOutcome::StreamEnd);
        assert_eq!(&out_buf[..out_cursor.written()], b"cab");
    }

    #[test]
    fn fixed_huffman_match_repeats_preceding_literal()
    {
        let mut bits = Vec::new();
        push_lsb(&mut bits, 1, 1); // BFINAL = 1
        push_lsb(&mut bits, 0b01, 2); // BTYPE = fixed Huffman

        push_msb(&mut bits, 0b0011_0000 + u64::from(b'a'), 8); // literal 'a'

        // length symbol 257 (base length 3, 0 extra bits): fixed code for
        // symbols 256..279 is 7 bits, value = symbol - 256.
        push_msb(&mut bits, 257 - 256, 7);

        // distance symbol 0 (base distance 1, 0 extra bits): fixed
        // distance codes are 5 bits, value = symbol.
        push_msb(&mut bits, 0, 5);

        push_msb(&mut bits, 0, 7); // end-of-block

        let input = pack_bits(&bits);
        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        let (outcome, _) = decoder.step(&mut in_cursor, &mut out_cursor).unwrap();
        assert_eq!(outcome, StepOutcome::StreamEnd);
        assert_eq!(&out_buf[..out_cursor.written()], b"aaaa");
    }

    #[test]
    fn reserved_block_type_is_rejected()
    {
        let mut bits = Vec::new();
        push_lsb(&mut bits, 1, 1); // BFINAL = 1
        push_lsb(&mut bits, 0b11, 2); // BTYPE = reserved

        let input = pack_bits(&bits);
        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        assert!(decoder.step(&mut in_cursor, &mut out_cursor).is_err());
    }

    #[test]
    fn stored_block_bad_nlen_complement_is_rejected()
    {
        let mut input = vec![0x01u8]; // BFINAL=1, BTYPE=00
        input.extend_from_slice(&3u16.to_le_bytes()); // LEN = 3
        input.extend_from_slice(&3u16.to_le_bytes()); // NLEN should be !3, not 3
        input.extend_from_slice(b"abc");

        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        assert!(decoder.step(&mut in_cursor, &mut out_cursor).is_err());
    }

    #[test]
    fn match_distance_exceeding_bytes_emitted_is_rejected()
    {
        let mut bits = Vec::new();
        push_lsb(&mut bits, 1, 1); // BFINAL = 1
        push_lsb(&mut bits, 0b01, 2); // BTYPE = fixed Huffman

        push_msb(&mut bits, 0b0011_0000 + u64::from(b'a'), 8); // literal 'a', 1 byte emitted
        push_msb(&mut bits, 257 - 256, 7); // length symbol 257 (base 3)
        // distance symbol 1 (fixed code, 5 bits, value 1) -> base distance 2,
        // but only 1 byte has been emitted so far.
        push_msb(&mut bits, 1, 5);

        let input = pack_bits(&bits);
        let mut decoder = Decoder::new(15);
        let mut in_cursor = InCursor::new(&input);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        assert!(decoder.step(&mut in_cursor, &mut out_cursor).is_err());
    }

    #[test]
    fn literal_length_symbol_above_285_is_rejected()
    {
        // A degenerate one-symbol litlen table assigning symbol 287 is a
        // valid canonical code (RFC 1951's single-symbol-length-1
        // exception) but 287 is outside the literal/length alphabet's
        // defined range, so the symbol loop must reject it regardless.
        let mut lens = [0u8; 288];
        lens[287] = 1;
        let table = HuffmanTable::build(&lens).unwrap();

        let mut decoder = Decoder::new(15);
        decoder.litlen_table = Some(table);
        decoder.dist_table = Some(HuffmanTable::build(&crate::constants::fixed_dist_lengths()).unwrap());
        decoder.state = State::SymNeedSymbol { partial: PartialDecode::default() };

        let data = [0u8];
        let mut in_cursor = InCursor::new(&data);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        assert!(decoder.step(&mut in_cursor, &mut out_cursor).is_err());
    }

    #[test]
    fn distance_symbol_30_is_rejected()
    {
        // Distance symbols 30 and 31 are reserved and must never appear in
        // a valid stream; force one into a degenerate one-symbol distance
        // table and confirm the symbol loop rejects it.
        let mut dist_lens = [0u8; 32];
        dist_lens[30] = 1;
        let dist_table = HuffmanTable::build(&dist_lens).unwrap();

        let mut decoder = Decoder::new(15);
        decoder.window.push(b'a'); // satisfy the distance-availability check first
        decoder.litlen_table =
            Some(HuffmanTable::build(&crate::constants::fixed_litlen_lengths()).unwrap());
        decoder.dist_table = Some(dist_table);
        decoder.state = State::SymNeedDistSymbol { length: 3, partial: PartialDecode::default() };

        let data = [0u8];
        let mut in_cursor = InCursor::new(&data);
        let mut out_buf = [0u8; 8];
        let mut out_cursor = OutCursor::new(&mut out_buf);

        assert!(decoder.step(&mut in_cursor, &mut out_cursor).is_err());
    }
}
