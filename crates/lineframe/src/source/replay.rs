use std::{
    io::{self, ErrorKind, Read},
    vec::Vec,
};

use super::ByteSource;

const PULL_CHUNK: usize = 8 * 1024;

/// Gives a forward-only reader random access by keeping every byte pulled.
///
/// Reads below the pulled frontier are served from the replay buffer; reads
/// beyond it pull from the reader until the offset is reached or the reader is
/// exhausted. Memory grows with the furthest offset requested, so this suits
/// sockets and pipes that must be rescanned after a reset, not unbounded
/// streams.
#[derive(Debug)]
pub struct ReplaySource<R> {
    inner: R,
    replay: Vec<u8>,
    exhausted: bool,
}

impl<R: Read> ReplaySource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            replay: Vec::new(),
            exhausted: false,
        }
    }

    /// Number of bytes pulled from the reader so far.
    #[must_use]
    pub fn pulled(&self) -> u64 {
        self.replay.len() as u64
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn pull_until(&mut self, end: u64) -> io::Result<()> {
        if self.exhausted || self.pulled() >= end {
            return Ok(());
        }
        let mut chunk = [0u8; PULL_CHUNK];
        while !self.exhausted && self.pulled() < end {
            match self.inner.read(&mut chunk) {
                Ok(0) => self.exhausted = true,
                Ok(n) => self.replay.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<R: Read> ByteSource for ReplaySource<R> {
    type Error = io::Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.pull_until(offset.saturating_add(buf.len() as u64))?;
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        let Some(available) = self.replay.get(start..) else {
            return Ok(0);
        };
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    /// Hands out at most one byte per read.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((&b, rest)), Some(slot)) => {
                    *slot = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn pulls_lazily_and_replays() {
        let mut s = ReplaySource::new(Trickle(b"abcdef"));
        assert_eq!(s.read_byte_at(2).unwrap(), Some(b'c'));
        assert_eq!(s.pulled(), 3);
        assert_eq!(s.read_byte_at(0).unwrap(), Some(b'a'));
        assert_eq!(s.pulled(), 3);
        assert_eq!(s.read_byte_at(5).unwrap(), Some(b'f'));
        assert_eq!(s.read_byte_at(6).unwrap(), None);
        assert_eq!(s.read_byte_at(1).unwrap(), Some(b'b'));
        assert_eq!(s.get_ref().0, b"");
    }

    #[test]
    fn replayed_reads_leave_the_reader_alone() {
        let mut s = ReplaySource::new(Trickle(b"abcdef"));
        assert_eq!(s.read_byte_at(1).unwrap(), Some(b'b'));
        let rest = s.get_ref().0;
        for offset in 0..2 {
            s.read_byte_at(offset).unwrap();
        }
        assert_eq!(s.pulled(), 2);
        assert_eq!(s.into_inner().0, rest);
    }

    #[test]
    fn read_errors_propagate() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("broken pipe"))
            }
        }

        let mut s = ReplaySource::new(Broken);
        let err = s.read_byte_at(0).unwrap_err();
        assert_eq!(err.to_string(), "broken pipe");
    }
}
