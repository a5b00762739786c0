//! Byte sources addressed by absolute offset.
//!
//! The scanner never trusts an implicit stream cursor: every byte is requested
//! at an explicit offset through [`ByteSource::read_at`]. Sources that can
//! seek implement it directly; forward-only streams go through
//! [`ReplaySource`], which keeps the bytes it has already pulled.
//!
//! A source may also own a handle that exists only between
//! [`ByteSource::open`] and [`ByteSource::close`] (see [`FileSource`]).
//! In-memory sources have nothing to acquire and keep the default no-ops.

#[cfg(feature = "std")]
mod io;
#[cfg(feature = "std")]
mod replay;
mod slice;

#[cfg(feature = "std")]
pub use io::{FileSource, SeekSource};
#[cfg(feature = "std")]
pub use replay::ReplaySource;
pub use slice::SliceSource;

/// Random-access byte input.
pub trait ByteSource {
    /// Error produced by opening or reading.
    type Error;

    /// Acquires whatever handle reads need. Called once per open/close cycle.
    ///
    /// # Errors
    ///
    /// Source specific; e.g. the file could not be opened.
    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases the handle acquired by [`open`](Self::open).
    fn close(&mut self) {}

    /// Reads bytes starting at absolute `offset` into `buf`.
    ///
    /// Returns the number of bytes read; `Ok(0)` means `offset` is at or past
    /// the end of the source.
    ///
    /// # Errors
    ///
    /// Source specific I/O failures.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Reads the single byte at `offset`, or `None` at end of source.
    ///
    /// # Errors
    ///
    /// Propagates [`read_at`](Self::read_at) failures.
    #[inline]
    fn read_byte_at(&mut self, offset: u64) -> Result<Option<u8>, Self::Error> {
        let mut byte = [0u8; 1];
        match self.read_at(offset, &mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

impl<B: ByteSource + ?Sized> ByteSource for &mut B {
    type Error = B::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_at(offset, buf)
    }

    fn read_byte_at(&mut self, offset: u64) -> Result<Option<u8>, Self::Error> {
        (**self).read_byte_at(offset)
    }
}
