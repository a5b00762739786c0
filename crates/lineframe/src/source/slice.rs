use core::convert::Infallible;

use super::ByteSource;

/// Byte source over an in-memory slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

fn copy_from(bytes: &[u8], offset: u64, buf: &mut [u8]) -> usize {
    let Ok(offset) = usize::try_from(offset) else {
        return 0;
    };
    let Some(available) = bytes.get(offset..) else {
        return 0;
    };
    let n = available.len().min(buf.len());
    buf[..n].copy_from_slice(&available[..n]);
    n
}

impl ByteSource for SliceSource<'_> {
    type Error = Infallible;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(copy_from(self.bytes, offset, buf))
    }
}

impl ByteSource for &[u8] {
    type Error = Infallible;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(copy_from(self, offset, buf))
    }
}
