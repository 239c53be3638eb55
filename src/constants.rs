//! Fixed tables and magic numbers from RFC 1951.
//!
//! Kept as a dedicated module, as in the teacher crate, so the decoder
//! itself reads as control flow rather than a wall of literals.

/// Maximum codeword length allowed for any DEFLATE Huffman code.
pub const DEFLATE_MAX_CODEWORD_LENGTH: usize = 15;

/// Number of symbols in the code-length ("precode") alphabet.
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

/// Number of symbols in the literal/length alphabet (0-255 literals, 256
/// end-of-block, 257-285 length codes, plus two reserved slots that must
/// never be assigned a nonzero code length).
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;

/// Number of symbols in the distance alphabet (0-29 used, 30-31 reserved).
pub const DEFLATE_NUM_DISTANCE_SYMS: usize = 32;

/// Order which precode lengths are stored. Ported verbatim from RFC 1951
/// section 3.2.7.
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u64 = 0;
pub const DEFLATE_BLOCKTYPE_STATIC: u64 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u64 = 2;
pub const DEFLATE_BLOCKTYPE_RESERVED: u64 = 3;

/// `LENGTH_BASE[sym - 257]` is the smallest match length represented by
/// literal/length symbol `sym`.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// `LENGTH_EXTRA_BITS[sym - 257]` is the number of extra bits following
/// the symbol that are added to `LENGTH_BASE[sym - 257]`.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// `DIST_BASE[sym]` is the smallest distance represented by distance
/// symbol `sym`.
pub const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// `DIST_EXTRA_BITS[sym]` is the number of extra bits following the
/// symbol that are added to `DIST_BASE[sym]`.
pub const DIST_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// The end-of-block literal/length symbol.
pub const END_OF_BLOCK_SYMBOL: u16 = 256;

/// Smallest literal/length symbol that denotes a length code.
pub const FIRST_LENGTH_SYMBOL: u16 = 257;

/// Largest valid literal/length symbol.
pub const LAST_LENGTH_SYMBOL: u16 = 285;

/// Smallest allowed window size, `2^8`.
pub const MIN_WINDOW_BITS: i8 = 8;

/// Largest allowed window size, `2^15`, the maximum distance DEFLATE can
/// express.
pub const MAX_WINDOW_BITS: i8 = 15;

/// Number of symbols in the code-length-of-code-lengths vector that a
/// repeat code (16/17/18) may never run past: `HLIT_max + HDIST_max`.
pub const MAX_LENS: usize = DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_DISTANCE_SYMS;

/// Build the fixed literal/length code-length vector from RFC 1951 section
/// 3.2.6, ported from the teacher's
/// `lens[000..144].fill(8)` / `lens[144..256].fill(9)` /
/// `lens[256..280].fill(7)` / `lens[280..288].fill(8)` construction.
pub fn fixed_litlen_lengths() -> [u8; DEFLATE_NUM_LITLEN_SYMS]
{
    let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS];
    lens[0..144].fill(8);
    lens[144..256].fill(9);
    lens[256..280].fill(7);
    lens[280..288].fill(8);
    lens
}

/// Build the fixed distance code-length vector: all 32 symbols, length 5.
pub fn fixed_dist_lengths() -> [u8; DEFLATE_NUM_DISTANCE_SYMS]
{
    [5u8; DEFLATE_NUM_DISTANCE_SYMS]
}
