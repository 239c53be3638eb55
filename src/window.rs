//! The sliding window DEFLATE back-references are resolved against.
//!
//! Grounded in the teacher-lineage C source's `window`/`window_size`/
//! `window_pos` fields, but the read-after-write pattern it used for
//! uncompressed blocks (reading bytes back from the just-written output
//! pointer) is rejected per the design notes: this window is always filled
//! directly from whichever source produced the bytes (literal, stored-block
//! copy, or match copy), never by re-reading the output cursor.

use crate::errors::DecodeErrorStatus;

/// A power-of-two ring buffer holding the most recently emitted bytes.
pub(crate) struct Window
{
    buf:   Vec<u8>,
    mask:  usize,
    pos:   usize,
    /// Total bytes ever written since this window was created. Saturates
    /// conceptually at `u64::MAX`, which is not a real-world concern for a
    /// byte stream.
    total: u64
}

impl Window
{
    pub(crate) fn new(window_bits: u8) -> Self
    {
        let size = 1usize << window_bits;
        Window { buf: vec![0u8; size], mask: size - 1, pos: 0, total: 0 }
    }

    pub(crate) fn size(&self) -> usize
    {
        self.buf.len()
    }

    /// Bytes available to be referenced by a back-reference distance: the
    /// window can only ever hold `size()` of them, but fewer may have been
    /// emitted yet.
    pub(crate) fn available(&self) -> u64
    {
        self.total.min(self.buf.len() as u64)
    }

    /// Total bytes ever pushed, uncapped. Used by the facade to report
    /// `total_out` across the lifetime of the stream.
    pub(crate) fn total_pushed(&self) -> u64
    {
        self.total
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8)
    {
        self.buf[self.pos] = byte;
        self.pos = (self.pos + 1) & self.mask;
        self.total += 1;
    }

    pub(crate) fn push_slice(&mut self, bytes: &[u8])
    {
        for &b in bytes
        {
            self.push(b);
        }
    }

    /// The byte `distance` positions behind the next write position.
    /// `distance` must be in `[1, size()]` and `<= available()`; callers
    /// are expected to have validated this already (see
    /// [`Window::check_distance`]).
    #[inline]
    pub(crate) fn byte_at_distance(&self, distance: usize) -> u8
    {
        let idx = self.pos.wrapping_sub(distance) & self.mask;
        self.buf[idx]
    }

    /// Validate a decoded back-reference distance against the policy in
    /// spec section 4.7: zero is always invalid, and a distance may never
    /// reach further back than both the window's capacity and the number
    /// of bytes actually emitted so far.
    pub(crate) fn check_distance(&self, distance: usize) -> Result<(), DecodeErrorStatus>
    {
        if distance == 0
        {
            return Err(DecodeErrorStatus::corrupt("match distance of zero"));
        }
        if distance as u64 > self.available() || distance > self.size()
        {
            return Err(DecodeErrorStatus::corrupt("match distance exceeds bytes emitted so far"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn distance_equal_to_window_size_is_valid_once_full()
    {
        let mut window = Window::new(8); // size 256
        for i in 0..256u32
        {
            window.push(i as u8);
        }
        assert!(window.check_distance(256).is_ok());
        assert!(window.check_distance(257).is_err());
    }

    #[test]
    fn self_overlapping_copy_repeats_last_byte()
    {
        let mut window = Window::new(8);
        window.push(b'A');

        // length=5, distance=1: each byte copied must see the byte the
        // previous iteration just wrote.
        let mut out = Vec::new();
        for _ in 0..5
        {
            let byte = window.byte_at_distance(1);
            out.push(byte);
            window.push(byte);
        }
        assert_eq!(out, b"AAAAA");
    }

    #[test]
    fn distance_zero_is_rejected()
    {
        let window = Window::new(8);
        assert!(window.check_distance(0).is_err());
    }
}
