//! Error types for EBML parsing and Matroska metadata extraction.
//!
//! Parsing and extraction fail for different reasons and are kept apart:
//! an [`EbmlError`] means the bytes are not a well-formed EBML tree, an
//! [`ExtractError`] means the tree is well-formed but does not have the
//! shape metadata extraction requires.

use thiserror::Error;

/// Failures while decoding the EBML byte stream.
#[derive(Error, Debug)]
pub enum EbmlError {
    /// Variable-length integer whose marker byte has no set bit.
    #[error("Malformed variable-length integer at offset {offset}: marker byte is 0x00")]
    MalformedVint {
        /// Offset of the marker byte.
        offset: u64,
    },

    /// Element body extends past the end of its enclosing container.
    #[error(
        "Element 0x{id:X} at offset {offset} ends at {element_end}, past its container end {container_end}"
    )]
    ElementOverrun {
        /// Element ID.
        id: u64,
        /// Offset of the element header.
        offset: u64,
        /// Offset one past the element body.
        element_end: u64,
        /// Offset one past the enclosing container.
        container_end: u64,
    },

    /// Float element with a length other than 0, 4, 8 or 10.
    #[error("Invalid float length: {length}")]
    InvalidFloatLength {
        /// Declared body length.
        length: u64,
    },

    /// Underlying stream failure, including truncation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while mapping a parsed tree onto metadata fields.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// The document has no EBML header element.
    #[error("Missing EBML header")]
    MissingEbmlHeader,

    /// Extraction requires exactly one audio track.
    #[error("Expected exactly one audio track, found {found}")]
    AudioTrackCount {
        /// Number of audio tracks present.
        found: usize,
    },
}

/// Error returned by the public metadata entry points.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Parse error: {0}")]
    Parse(#[from] EbmlError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for EBML decoding.
pub type Result<T> = std::result::Result<T, EbmlError>;
