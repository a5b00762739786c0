//! Retrying fallible operations, and a byte source that retries its reads.
//!
//! The scanner itself never retries: a failed read surfaces as
//! [`ScanError::Source`](crate::ScanError::Source). Wrapping the source in a
//! [`RetrySource`] moves the retry below the scanner, one read at a time.

use core::fmt::Display;
use std::{io, thread, time::Duration};

use crate::source::ByteSource;

/// Retry policy: how often to retry, how long to wait, and whether to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
    /// Failed attempts tolerated before the final attempt.
    ///
    /// The operation runs at most `retries + 1` times; the result of the last
    /// run is returned as is.
    ///
    /// # Default
    ///
    /// `3`
    pub retries: u32,

    /// Pause after each failed attempt.
    ///
    /// # Default
    ///
    /// Zero.
    pub delay: Duration,

    /// Log each retried failure at `warn` level.
    ///
    /// # Default
    ///
    /// `true`
    pub log_errors: bool,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::ZERO,
            log_errors: true,
        }
    }
}

impl Retry {
    #[must_use]
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.log_errors = false;
        self
    }

    /// Runs `op`, retrying errors for which `is_retryable` returns `true`.
    ///
    /// Errors the predicate rejects are returned immediately.
    ///
    /// # Errors
    ///
    /// The first non-retryable error, or the error of the final attempt.
    pub fn run<T, E, F, P>(&self, mut op: F, mut is_retryable: P) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
        P: FnMut(&E) -> bool,
    {
        let mut attempt = 0;
        while attempt < self.retries {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if is_retryable(&e) => {
                    attempt += 1;
                    if self.log_errors {
                        log::warn!("{e}, attempt {attempt} of {}", self.retries);
                    }
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        op()
    }

    /// Runs `op`, retrying every error.
    ///
    /// # Errors
    ///
    /// The error of the final attempt.
    pub fn run_any<T, E, F>(&self, op: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
    {
        self.run(op, |_| true)
    }
}

/// I/O errors that are worth another attempt.
#[must_use]
pub fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// A [`ByteSource`] that applies a [`Retry`] policy to `open` and every read.
#[derive(Debug)]
pub struct RetrySource<B, P> {
    inner: B,
    policy: Retry,
    is_retryable: P,
}

impl<B, P> RetrySource<B, P>
where
    B: ByteSource,
    P: FnMut(&B::Error) -> bool,
{
    pub fn new(inner: B, policy: Retry, is_retryable: P) -> Self {
        Self {
            inner,
            policy,
            is_retryable,
        }
    }

    pub fn get_ref(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B, P> ByteSource for RetrySource<B, P>
where
    B: ByteSource,
    B::Error: Display,
    P: FnMut(&B::Error) -> bool,
{
    type Error = B::Error;

    fn open(&mut self) -> Result<(), Self::Error> {
        let inner = &mut self.inner;
        self.policy.run(|| inner.open(), &mut self.is_retryable)
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let inner = &mut self.inner;
        self.policy
            .run(|| inner.read_at(offset, buf), &mut self.is_retryable)
    }
}
