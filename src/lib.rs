//! A resumable, cursor-based RFC 1951 DEFLATE decompressor.
//!
//! The core is [`InflateStream`]: construct one with [`InflateStream::new`],
//! then repeatedly call [`InflateStream::step`] with whatever input and
//! output buffers happen to be available, in any size, in any order. For
//! callers that already hold the whole compressed buffer in memory and
//! just want the decoded bytes, [`decode_deflate`] (and, with the `zlib`/
//! `gzip` features, [`decode_zlib`]/[`decode_gzip`]) wrap that loop.
//!
//! This crate decodes DEFLATE only; it does not produce compressed output.

mod bitstream;
mod constants;
mod container;
mod decoder;
#[cfg(test)]
mod encoder;
pub mod errors;
mod huffman;
mod oneshot;
mod options;
mod stream;
mod window;

pub use oneshot::decode_deflate;
#[cfg(feature = "gzip")]
pub use oneshot::decode_gzip;
#[cfg(feature = "gzip")]
pub use oneshot::decode_gzip_with_options;
#[cfg(feature = "zlib")]
pub use oneshot::decode_zlib;
#[cfg(feature = "zlib")]
pub use oneshot::decode_zlib_with_options;
pub use oneshot::decode_deflate_with_options;
pub use options::DeflateOptions;
pub use stream::{FlushMode, InflateStream, StepReport};
