//! Fixed-capacity byte window with drop-oldest eviction.
//!
//! The window holds the most recent `capacity` bytes pushed into it. Storage
//! is a boxed slice allocated once at construction; the per-byte path never
//! reallocates.
//!
//! Invariants
//! - `len <= capacity` and `head < capacity`.
//! - The byte at logical index `i` lives at `(head + i) % capacity`.
//! - A push into a full window overwrites the oldest byte and advances `head`.

use alloc::{boxed::Box, vec, vec::Vec};

/// Bounded FIFO of single bytes.
#[derive(Debug, Clone)]
pub struct BoundedByteWindow {
    buf: Box<[u8]>,
    head: usize,
    len: usize,
}

impl BoundedByteWindow {
    /// Creates an empty window retaining at most `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedByteWindow capacity must be > 0");
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of bytes the window retains.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Appends `byte`, evicting the oldest byte first when the window is full.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        let cap = self.buf.len();
        if self.len == cap {
            self.buf[self.head] = byte;
            self.head = (self.head + 1) % cap;
        } else {
            let tail = (self.head + self.len) % cap;
            self.buf[tail] = byte;
            self.len += 1;
        }
    }

    /// Returns the retained bytes as up to two slices in insertion order.
    ///
    /// The second slice is non-empty only when the contents wrap around the
    /// end of the backing storage.
    #[must_use]
    pub fn segments(&self) -> (&[u8], &[u8]) {
        let cap = self.buf.len();
        if self.len <= cap - self.head {
            (&self.buf[self.head..self.head + self.len], &[])
        } else {
            let first = cap - self.head;
            (&self.buf[self.head..], &self.buf[..self.len - first])
        }
    }

    /// Copies the retained bytes, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        self.snapshot_into(&mut out);
        out
    }

    /// Appends the retained bytes to `dst`, oldest first.
    pub fn snapshot_into(&self, dst: &mut Vec<u8>) {
        let (front, back) = self.segments();
        dst.extend_from_slice(front);
        dst.extend_from_slice(back);
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::BoundedByteWindow;

    #[test]
    fn empty_window_snapshots_nothing() {
        let w = BoundedByteWindow::with_capacity(4);
        assert!(w.is_empty());
        assert!(!w.is_full());
        assert_eq!(w.snapshot(), b"");
        assert_eq!(w.segments(), (&b""[..], &b""[..]));
    }

    #[rstest]
    #[case(1, b"a", b"a")]
    #[case(1, b"abc", b"c")]
    #[case(3, b"ab", b"ab")]
    #[case(3, b"abc", b"abc")]
    #[case(3, b"abcd", b"bcd")]
    #[case(3, b"abcdefg", b"efg")]
    fn keeps_the_newest_bytes(
        #[case] capacity: usize,
        #[case] pushed: &[u8],
        #[case] expected: &[u8],
    ) {
        let mut w = BoundedByteWindow::with_capacity(capacity);
        for &b in pushed {
            w.push(b);
        }
        assert_eq!(w.snapshot(), expected);
        assert_eq!(w.len(), expected.len());
    }

    #[test]
    fn segments_split_when_wrapped() {
        let mut w = BoundedByteWindow::with_capacity(4);
        for &b in b"abcdef" {
            w.push(b);
        }
        let (front, back) = w.segments();
        assert_eq!(front, b"cd");
        assert_eq!(back, b"ef");
        assert!(w.is_full());
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut w = BoundedByteWindow::with_capacity(2);
        w.push(b'x');
        w.push(b'y');
        assert_eq!(w.snapshot(), b"xy");
        assert_eq!(w.snapshot(), b"xy");
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn clear_empties_and_allows_reuse() {
        let mut w = BoundedByteWindow::with_capacity(3);
        for &b in b"abcde" {
            w.push(b);
        }
        w.clear();
        assert!(w.is_empty());
        assert_eq!(w.capacity(), 3);
        w.push(b'z');
        assert_eq!(w.snapshot(), b"z");
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_panics() {
        let _ = BoundedByteWindow::with_capacity(0);
    }

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn retains_last_capacity_bytes(capacity: u8, bytes: Vec<u8>) -> bool {
        let capacity = usize::from(capacity % 16) + 1;
        let mut w = BoundedByteWindow::with_capacity(capacity);
        for &b in &bytes {
            w.push(b);
        }
        let keep = bytes.len().min(capacity);
        w.len() == keep && w.snapshot() == bytes[bytes.len() - keep..]
    }
}
