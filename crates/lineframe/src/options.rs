use crate::error::ConfigError;

/// Default maximum record length, in bytes.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Default record separator.
pub const DEFAULT_SEPARATOR: u8 = b'\n';

/// Configuration for a [`DelimitedScanner`](crate::DelimitedScanner).
///
/// # Examples
///
/// ```rust
/// use lineframe::{ScannerOptions, TrailingRecord};
///
/// let options = ScannerOptions {
///     capacity: 80,
///     separator: b';',
///     ..Default::default()
/// };
/// assert_eq!(options.trailing, TrailingRecord::Always);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScannerOptions {
    /// Maximum length of a record, in bytes, excluding the separator.
    ///
    /// Records longer than this are reported as
    /// [`Scan::TooLong`](crate::Scan::TooLong) and their content is dropped.
    /// Must be greater than zero.
    ///
    /// # Default
    ///
    /// `4096`
    pub capacity: usize,

    /// The byte that terminates a record.
    ///
    /// # Default
    ///
    /// `b'\n'`
    pub separator: u8,

    /// What the scanner yields when the source runs out.
    ///
    /// # Default
    ///
    /// [`TrailingRecord::Always`]
    pub trailing: TrailingRecord,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            separator: DEFAULT_SEPARATOR,
            trailing: TrailingRecord::default(),
        }
    }
}

impl ScannerOptions {
    /// Options with the given capacity and the default separator.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Replaces the separator with the single byte in `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SeparatorLength`] unless `separator` is exactly
    /// one byte long.
    pub fn separator_bytes(mut self, separator: &[u8]) -> Result<Self, ConfigError> {
        match separator {
            [b] => {
                self.separator = *b;
                Ok(self)
            }
            _ => Err(ConfigError::SeparatorLength(separator.len())),
        }
    }

    /// Checks the invariants a scanner relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// End-of-stream policy for the synthetic flush.
///
/// When the source is exhausted the scanner classifies the separator as if it
/// had been read, so any trailing partial record is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrailingRecord {
    /// Always flush, advancing the position as if a byte had been consumed.
    ///
    /// A source that is empty, or that ends with a separator, therefore yields
    /// one final empty record. This matches the line reader this crate
    /// replaces byte for byte.
    #[default]
    Always,
    /// Flush only when bytes are pending, without advancing the position.
    ///
    /// A source ending with a separator yields no extra empty record. A
    /// trailing record longer than the capacity is still reported as too long.
    NonEmpty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_line_reader() {
        let o = ScannerOptions::default();
        assert_eq!(o.capacity, 4096);
        assert_eq!(o.separator, b'\n');
        assert_eq!(o.trailing, TrailingRecord::Always);
        assert_eq!(o.validate(), Ok(()));
    }

    #[test]
    fn separator_bytes_requires_one_byte() {
        let o = ScannerOptions::with_capacity(10);
        assert_eq!(o.separator_bytes(b"|").map(|o| o.separator), Ok(b'|'));
        assert_eq!(o.separator_bytes(b""), Err(ConfigError::SeparatorLength(0)));
        assert_eq!(o.separator_bytes(b"ab"), Err(ConfigError::SeparatorLength(2)));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        assert_eq!(
            ScannerOptions::with_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let o: ScannerOptions =
            serde_json::from_str(r#"{"capacity":80,"trailing":"non_empty"}"#).unwrap();
        assert_eq!(
            o,
            ScannerOptions {
                capacity: 80,
                separator: b'\n',
                trailing: TrailingRecord::NonEmpty,
            }
        );
        let text = serde_json::to_string(&o).unwrap();
        assert_eq!(text, r#"{"capacity":80,"separator":10,"trailing":"non_empty"}"#);
    }
}
