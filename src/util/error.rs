//! Error types for the tesm exporter.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FULHAX export and inspection.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Missing "FULHAX" marker at start of file
    #[error("Invalid FULHAX file: expected magic bytes")]
    InvalidMagic,

    /// Stream is truncated inside a header or payload
    #[error("Unexpected end of file at position {0}")]
    UnexpectedEof(u64),

    /// Type tag that no payload decoder knows about
    #[error("Unknown node type tag {0}")]
    UnknownNodeType(u16),

    /// Invalid data structure in file
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// A string that cannot be represented in the requested encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A value that does not fit its fixed-width field
    #[error("{what} value {value} out of range (max {max})")]
    ValueOutOfRange { what: &'static str, value: u64, max: u64 },

    /// Components-per-vertex or vertices-per-face outside the allowed range
    #[error("Invalid {what} arity {arity}")]
    InvalidArity { what: &'static str, arity: usize },

    /// Geometry input that cannot be turned into arrays
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A payload wrote a different number of bytes than it declared
    #[error("Payload size mismatch for {node}: declared {declared}, wrote {written}")]
    SizeMismatch { node: &'static str, declared: u64, written: u64 },

    /// Parent links loop back onto themselves
    #[error("Cyclic object hierarchy at '{0}'")]
    CyclicHierarchy(String),

    /// Object id not present in the scene
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Export options or scene description could not be parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create an out-of-range error for a named field.
    pub fn out_of_range(what: &'static str, value: u64, max: u64) -> Self {
        Self::ValueOutOfRange { what, value, max }
    }
}

/// Result type alias for tesm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Narrow a length or count to `u32`, failing instead of truncating.
#[inline]
pub fn checked_u32(what: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::out_of_range(what, value as u64, u32::MAX as u64))
}
