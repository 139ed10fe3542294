//! Error types for codegen operations.

use thiserror::Error;

/// Error while loading a serialized table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input does not start with the archive magic.
    #[error("bad magic, not a binclude archive")]
    BadMagic,

    /// Archive was written by an incompatible version.
    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u8),

    /// Input ended in the middle of a record.
    #[error("unexpected end of input at offset {offset}")]
    Truncated {
        /// Byte offset where more input was expected.
        offset: usize,
    },

    /// A record lacks a required field.
    #[error("record {index} is missing field '{field}'")]
    MissingField {
        /// Index of the record.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A fixed-size field has the wrong length.
    #[error("field '{field}' has length {len}")]
    BadLength {
        /// Name of the field.
        field: &'static str,
        /// Length found.
        len: usize,
    },

    /// A text field is not valid UTF-8.
    #[error("field '{0}' is not valid UTF-8")]
    InvalidUtf8(&'static str),

    /// Unknown compression tag.
    #[error("unknown compression tag {0}")]
    UnknownCompression(u8),

    /// Two records share a path.
    #[error("duplicate path '{0}'")]
    DuplicatePath(String),

    /// A value is too long for its `u32` length header.
    #[error("field '{field}' is {len} bytes, longer than an archive length header allows")]
    TooLarge {
        /// Name of the field, or `count` for the record count.
        field: &'static str,
        /// Length that did not fit.
        len: usize,
    },

    /// Bytes remain after the last record.
    #[error("{0} trailing bytes after last record")]
    TrailingBytes(usize),
}
