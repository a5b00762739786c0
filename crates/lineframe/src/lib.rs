//! Bounded-memory scanning of separator-delimited records.
//!
//! A [`DelimitedScanner`] reads a [`ByteSource`] one byte at a time at explicit
//! absolute offsets and yields the records between separators. The current
//! record is held in a [`BoundedByteWindow`] of fixed capacity; a record that
//! outgrows it is reported as [`Scan::TooLong`] instead of being truncated,
//! and scanning resumes cleanly at the next record.
//!
//! ```rust
//! use lineframe::{DelimitedScanner, Scan, ScannerOptions};
//!
//! let input: &[u8] = b"ab\ncdefg\n\n";
//! let mut scanner = DelimitedScanner::new(input, ScannerOptions::with_capacity(3))?;
//! scanner.open()?;
//! assert_eq!(scanner.next_scan()?, Scan::Record("ab".into()));
//! assert_eq!(scanner.next_scan()?, Scan::TooLong);
//! assert_eq!(scanner.next_scan()?, Scan::Record("".into()));
//! // The end-of-stream flush reports the (empty) record after the last separator.
//! assert_eq!(scanner.next_scan()?, Scan::Record("".into()));
//! assert_eq!(scanner.next_scan()?, Scan::EndOfStream);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod options;
mod scanner;
mod source;
mod window;

#[cfg(feature = "std")]
mod retry;
#[cfg(feature = "std")]
mod timer;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ScanError};
pub use options::{DEFAULT_CAPACITY, DEFAULT_SEPARATOR, ScannerOptions, TrailingRecord};
#[cfg(feature = "std")]
pub use retry::{Retry, RetrySource, is_transient};
pub use scanner::{DelimitedScanner, Line, Scan, Session};
#[cfg(feature = "std")]
pub use source::{FileSource, ReplaySource, SeekSource};
pub use source::{ByteSource, SliceSource};
#[cfg(feature = "std")]
pub use timer::timed;
pub use window::BoundedByteWindow;
