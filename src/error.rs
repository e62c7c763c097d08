//! Error types for conversion operations
//!
//! The transducer itself is total and never fails. These errors only come out
//! of the boundary layer: decoding bytes into text, enforcing the input size
//! limit, and the command-line front end's file handling.

use std::fmt;

/// Errors that can occur before or around HTML to Markdown conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input bytes are not UTF-8
    EncodingError(String),
    /// Invalid input data
    InvalidInput(String),
    /// Reading input or writing output failed
    Io(String),
}

impl ConversionError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            ConversionError::EncodingError(_) => 2,
            ConversionError::InvalidInput(_) => 5,
            ConversionError::Io(_) => 74,
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ConversionError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            ConversionError::EncodingError("x".to_string()),
            ConversionError::InvalidInput("x".to_string()),
            ConversionError::Io("x".to_string()),
        ];
        let mut codes: Vec<u32> = errors.iter().map(ConversionError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_includes_message() {
        let err = ConversionError::EncodingError("Invalid UTF-8 at byte position 4".to_string());
        assert_eq!(err.to_string(), "Encoding error: Invalid UTF-8 at byte position 4");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.html");
        let err = ConversionError::from(io);
        assert!(matches!(err, ConversionError::Io(ref msg) if msg.contains("missing.html")));
    }
}
