//! Scanner: turns a byte source into separator-delimited records.
//!
//! What it does
//! - Pulls one byte at a time from the source at an explicit absolute offset
//!   (`cursor`), so repositioning the underlying handle between calls has no
//!   effect on the scan.
//! - Accumulates the current record in a [`BoundedByteWindow`] of `capacity`
//!   bytes. Length is classified from two absolute counters (`cursor` and
//!   `record_start`), never from the window, so a record of any length costs
//!   at most `capacity` bytes of storage.
//! - On a separator, yields the window contents as a record, or
//!   [`Scan::TooLong`] when the record outgrew the capacity. The window is
//!   cleared before the next record starts.
//! - When the source runs out, runs a synthetic flush with the separator as
//!   the terminator; [`TrailingRecord`] decides whether that flush can yield
//!   an empty record.
//!
//! Invariants
//! - `cursor >= record_start`.
//! - `finished` stays set until [`DelimitedScanner::reset`] or
//!   [`DelimitedScanner::close`].
//! - Once finished, [`DelimitedScanner::next_scan`] returns
//!   [`Scan::EndOfStream`] without touching the source or the counters.
//!
//! A failed read leaves the counters wherever the failure happened; call
//! `reset` before scanning the source again.
//!
//! The [`Iterator`] impl yields an error at most once and then returns `None`
//! until the scanner is reopened or reset; `next_scan` keeps reporting.

use core::ops::{Deref, DerefMut};

use bstr::BString;

use crate::{
    error::{ConfigError, ScanError},
    options::{ScannerOptions, TrailingRecord},
    source::ByteSource,
    window::BoundedByteWindow,
};

/// One step of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A complete record, separator excluded. May be empty.
    Record(BString),
    /// A record longer than the capacity. Its content is not retained.
    TooLong,
    /// The source is exhausted and the final record has been reported.
    EndOfStream,
}

impl Scan {
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Scan::EndOfStream)
    }
}

/// A record reported by the scanner's [`Iterator`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Record(BString),
    TooLong,
}

impl Line {
    /// The record bytes, or `None` for an oversized record.
    #[must_use]
    pub fn as_record(&self) -> Option<&[u8]> {
        match self {
            Line::Record(bytes) => Some(bytes.as_slice()),
            Line::TooLong => None,
        }
    }
}

impl From<Line> for Scan {
    fn from(line: Line) -> Self {
        match line {
            Line::Record(bytes) => Scan::Record(bytes),
            Line::TooLong => Scan::TooLong,
        }
    }
}

/// Bounded-memory reader of separator-delimited records.
///
/// ```rust
/// use lineframe::{DelimitedScanner, Line, ScannerOptions};
///
/// let input: &[u8] = b"ab\ncdefg\nh";
/// let mut scanner =
///     DelimitedScanner::new(input, ScannerOptions::with_capacity(3)).unwrap();
/// let lines: Vec<Line> = scanner.session().unwrap().map(Result::unwrap).collect();
/// assert_eq!(
///     lines,
///     [
///         Line::Record("ab".into()),
///         Line::TooLong,
///         Line::Record("h".into()),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct DelimitedScanner<S> {
    source: S,
    options: ScannerOptions,
    window: BoundedByteWindow,
    cursor: u64,
    record_start: u64,
    finished: bool,
    open: bool,
    // Set once the iterator has yielded an error.
    halted: bool,
}

impl<S: ByteSource> DelimitedScanner<S> {
    /// Creates a closed scanner over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when `options.capacity` is zero.
    pub fn new(source: S, options: ScannerOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            source,
            window: BoundedByteWindow::with_capacity(options.capacity),
            options,
            cursor: 0,
            record_start: 0,
            finished: false,
            open: false,
            halted: false,
        })
    }

    /// Creates a closed scanner with an explicit separator given as bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeparatorLength`] unless `separator` is exactly
    /// one byte, or [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn with_separator(
        source: S,
        capacity: usize,
        separator: &[u8],
    ) -> Result<Self, ConfigError> {
        let options = ScannerOptions::with_capacity(capacity).separator_bytes(separator)?;
        Self::new(source, options)
    }

    /// Binds the source. Calling it again while open does nothing.
    ///
    /// # Errors
    ///
    /// [`ScanError::Source`] if the source cannot be opened.
    pub fn open(&mut self) -> Result<(), ScanError<S::Error>> {
        if self.open {
            return Ok(());
        }
        self.source.open().map_err(ScanError::Source)?;
        self.open = true;
        self.halted = false;
        log::trace!("scanner opened (capacity {})", self.options.capacity);
        Ok(())
    }

    /// Releases the source and rewinds all scan state. Does nothing when the
    /// scanner is not open.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.source.close();
        self.open = false;
        self.rewind();
        log::trace!("scanner closed");
    }

    /// Rewinds to offset 0 without releasing the source, so the same source
    /// can be scanned again.
    pub fn reset(&mut self) {
        self.rewind();
        log::trace!("scanner reset");
    }

    fn rewind(&mut self) {
        self.window.clear();
        self.cursor = 0;
        self.record_start = 0;
        self.finished = false;
        self.halted = false;
    }

    /// Opens the scanner and returns a guard that closes it when dropped.
    ///
    /// # Errors
    ///
    /// [`ScanError::Source`] if the source cannot be opened.
    pub fn session(&mut self) -> Result<Session<'_, S>, ScanError<S::Error>> {
        self.open()?;
        Ok(Session { scanner: self })
    }

    /// Scans forward to the next record boundary.
    ///
    /// A single call may read many bytes. After the source is exhausted and
    /// the final record reported, every further call returns
    /// [`Scan::EndOfStream`].
    ///
    /// # Errors
    ///
    /// [`ScanError::NotOpen`] before [`open`](Self::open), or
    /// [`ScanError::Source`] when a read fails.
    pub fn next_scan(&mut self) -> Result<Scan, ScanError<S::Error>> {
        if !self.open {
            return Err(ScanError::NotOpen);
        }
        if self.finished {
            return Ok(Scan::EndOfStream);
        }
        loop {
            match self.source.read_byte_at(self.cursor).map_err(ScanError::Source)? {
                Some(byte) => {
                    if let Some(line) = self.classify(byte) {
                        return Ok(line.into());
                    }
                }
                None => return Ok(self.flush().map_or(Scan::EndOfStream, Scan::from)),
            }
        }
    }

    /// Accounts for one consumed byte. Returns a line only at a separator.
    #[inline]
    fn classify(&mut self, byte: u8) -> Option<Line> {
        self.cursor += 1;
        let record_len = self.cursor - self.record_start - 1;
        if byte == self.options.separator {
            return Some(self.complete(record_len));
        }
        if record_len <= self.capacity_u64() {
            self.window.push(byte);
        }
        None
    }

    fn flush(&mut self) -> Option<Line> {
        self.finished = true;
        log::trace!("source exhausted at offset {}", self.cursor);
        match self.options.trailing {
            TrailingRecord::Always => self.classify(self.options.separator),
            TrailingRecord::NonEmpty if self.window.is_empty() => None,
            TrailingRecord::NonEmpty => Some(self.complete(self.cursor - self.record_start)),
        }
    }

    fn complete(&mut self, record_len: u64) -> Line {
        let line = if record_len <= self.capacity_u64() {
            log::trace!("record at {} ({record_len} bytes)", self.record_start);
            Line::Record(BString::from(self.window.snapshot()))
        } else {
            log::debug!(
                "record at {} exceeds capacity {} ({record_len} bytes)",
                self.record_start,
                self.options.capacity
            );
            Line::TooLong
        };
        self.window.clear();
        self.record_start = self.cursor;
        line
    }

    #[inline]
    fn capacity_u64(&self) -> u64 {
        self.options.capacity as u64
    }
}

impl<S> DelimitedScanner<S> {
    #[must_use]
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.options.capacity
    }

    #[must_use]
    pub fn separator(&self) -> u8 {
        self.options.separator
    }

    /// Absolute offset of the next byte to read.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Absolute offset where the current record began.
    #[must_use]
    pub fn record_start(&self) -> u64 {
        self.record_start
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ByteSource> DelimitedScanner<S> {
    /// Closes the scanner and hands back the source.
    pub fn into_source(mut self) -> S {
        self.close();
        self.source
    }
}

impl<S: ByteSource> Iterator for DelimitedScanner<S> {
    type Item = Result<Line, ScanError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        match self.next_scan() {
            Ok(Scan::Record(bytes)) => Some(Ok(Line::Record(bytes))),
            Ok(Scan::TooLong) => Some(Ok(Line::TooLong)),
            Ok(Scan::EndOfStream) => None,
            Err(e) => {
                self.halted = true;
                Some(Err(e))
            }
        }
    }
}

/// An open scanner that closes itself when dropped.
///
/// Returned by [`DelimitedScanner::session`]; derefs to the scanner, so
/// [`reset`](DelimitedScanner::reset) and the accessors remain available.
#[derive(Debug)]
pub struct Session<'a, S: ByteSource> {
    scanner: &'a mut DelimitedScanner<S>,
}

impl<S: ByteSource> Session<'_, S> {
    /// Absolute offset of the next byte to read.
    ///
    /// Shadows [`Iterator::position`], which would otherwise win over the
    /// scanner's accessor through deref.
    #[must_use]
    pub fn position(&self) -> u64 {
        DelimitedScanner::position(self.scanner)
    }
}

impl<S: ByteSource> Deref for Session<'_, S> {
    type Target = DelimitedScanner<S>;

    fn deref(&self) -> &Self::Target {
        self.scanner
    }
}

impl<S: ByteSource> DerefMut for Session<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scanner
    }
}

impl<S: ByteSource> Iterator for Session<'_, S> {
    type Item = Result<Line, ScanError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scanner.next()
    }
}

impl<S: ByteSource> Drop for Session<'_, S> {
    fn drop(&mut self) {
        self.scanner.close();
    }
}
