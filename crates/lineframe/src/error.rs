use thiserror::Error;

/// Invalid scanner configuration, reported at construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("record capacity must be greater than zero")]
    ZeroCapacity,
    #[error("separator must be exactly one byte, got {0} bytes")]
    SeparatorLength(usize),
}

/// Errors produced while scanning.
///
/// `E` is the error type of the underlying [`ByteSource`](crate::ByteSource);
/// source failures are passed through unchanged.
#[derive(Error, Debug, PartialEq)]
pub enum ScanError<E> {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("scanner is not open")]
    NotOpen,
    #[error("source error: {0}")]
    Source(E),
}

impl<E> ScanError<E> {
    /// Returns the source error, if this is one.
    pub fn into_source(self) -> Option<E> {
        match self {
            ScanError::Source(e) => Some(e),
            _ => None,
        }
    }
}
