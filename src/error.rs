//! Error types for the font subsystem.
//!
//! This module defines all error types that can occur while parsing font programs,
//! reading or writing CMaps, and mapping text through a loaded font.

use crate::object::ObjectRef;

/// Result type alias for font subsystem operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during font processing.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Malformed font or CMap data at a specific byte offset
    #[error("Failed to parse font data at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Input ended before a structure was complete
    #[error("Unexpected end of data at byte {offset}")]
    UnexpectedEof {
        /// Byte offset where more data was expected
        offset: usize,
    },

    /// TrueType cmap subtable format the reader does not handle
    #[error("Unsupported cmap subtable format: {0}")]
    UnsupportedCMapFormat(u16),

    /// Required sfnt table is absent
    #[error("Missing required table: '{0}'")]
    MissingTable(String),

    /// Font program format could not be recognized
    #[error("Unsupported font format: {0}")]
    UnsupportedFormat(String),

    /// Byte sequence with no mapping in the font (Exception fallback policy)
    #[error("Cannot decode character code <{code:02X}> at byte {offset}")]
    DecodeError {
        /// Byte offset of the unmapped code in the input
        offset: usize,
        /// The unmapped byte
        code: u8,
    },

    /// Character with no code in the font (Exception fallback policy)
    #[error("Cannot encode character {character:?} (U+{:04X}) at index {index}", *.character as u32)]
    EncodeError {
        /// The offending character
        character: char,
        /// Character index in the input text
        index: usize,
    },

    /// Invalid font configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Font resource previously failed to load
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    /// Referenced object not found in the object store
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectRef),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}

impl Error {
    /// Shorthand for a [`Error::ParseError`].
    pub fn parse(offset: usize, reason: impl Into<String>) -> Self {
        Error::ParseError {
            offset,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = Error::ParseError {
            offset: 1234,
            reason: "invalid INDEX offSize".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1234"));
        assert!(msg.contains("invalid INDEX offSize"));
    }

    #[test]
    fn test_unsupported_cmap_format() {
        let err = Error::UnsupportedCMapFormat(12);
        assert_eq!(err.to_string(), "Unsupported cmap subtable format: 12");
    }

    #[test]
    fn test_encode_error_names_character() {
        let err = Error::EncodeError {
            character: 'λ',
            index: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("U+03BB"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn test_decode_error_offset() {
        let err = Error::DecodeError { offset: 7, code: 0xFF };
        let msg = err.to_string();
        assert!(msg.contains("byte 7"));
        assert!(msg.contains("FF"));
    }

    #[test]
    fn test_object_not_found_error() {
        let err = Error::ObjectNotFound(ObjectRef::new(10, 0));
        assert!(err.to_string().contains("10 0 R"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "font.ttf");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
