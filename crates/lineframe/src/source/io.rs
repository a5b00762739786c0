use std::{
    fs::File,
    io::{self, ErrorKind, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use super::ByteSource;

/// Adapts any `Read + Seek` handle by seeking before every read.
#[derive(Debug)]
pub struct SeekSource<R> {
    inner: R,
}

impl<R: Read + Seek> SeekSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

fn read_at<R: Read + Seek>(inner: &mut R, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    inner.seek(SeekFrom::Start(offset))?;
    loop {
        match inner.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            other => return other,
        }
    }
}

impl<R: Read + Seek> ByteSource for SeekSource<R> {
    type Error = io::Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        read_at(&mut self.inner, offset, buf)
    }
}

/// A file named by path, opened read-only on [`ByteSource::open`] and
/// released on [`ByteSource::close`].
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Option<File>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl ByteSource for FileSource {
    type Error = io::Error;

    fn open(&mut self) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(File::open(&self.path)?);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.file = None;
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let Some(file) = self.file.as_mut() else {
            return Err(io::Error::new(
                ErrorKind::NotConnected,
                "file source is not open",
            ));
        };
        read_at(file, offset, buf)
    }
}
