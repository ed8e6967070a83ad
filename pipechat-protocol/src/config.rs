/// Deployment-wide protocol settings
use crate::Error;

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: char = '|';

// 640k ought to be enough for anyone
pub const MAX_LINE_LENGTH: usize = 1024 * 640;

/// Settings that must match between client and server
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    delimiter: char,
    max_line_length: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            max_line_length: MAX_LINE_LENGTH,
        }
    }
}

impl ProtocolConfig {
    /// Creates a config with a custom delimiter
    ///
    /// Line terminators are rejected since frames are carried one per line.
    pub fn new(delimiter: char) -> Result<Self, Error> {
        if delimiter == '\n' || delimiter == '\r' {
            return Err(Error::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            delimiter,
            ..Self::default()
        })
    }

    pub fn with_max_line_length(self, max_line_length: usize) -> Self {
        Self {
            max_line_length,
            ..self
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }
}
