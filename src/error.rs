//! Error type for file system operations.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::codegen::FormatError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Stage of a gzip decode that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// The gzip header could not be opened.
    Open,
    /// The compressed body could not be read.
    Read,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("gzip open"),
            Self::Read => f.write_str("gzip read"),
        }
    }
}

/// Error returned by [`FileSystem`](crate::FileSystem) and open handles.
///
/// Errors are always returned to the immediate caller. A failed
/// [`compress`](crate::FileSystem::compress) or
/// [`decompress`](crate::FileSystem::decompress) leaves the table untouched.
///
/// # Example
///
/// ```ignore
/// match fs.read_file("templates/index.html") {
///     Ok(bytes) => { /* ... */ }
///     Err(e) if e.is_not_found() => eprintln!("asset was not embedded: {e}"),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// The path is not present in the embedded table.
    #[error("{op} {path}: file does not exist in binclude table")]
    NotFound {
        /// Operation that performed the lookup.
        op: &'static str,
        /// Normalized path that was looked up.
        path: String,
    },

    /// A compressed entry could not be decoded.
    #[error("{stage} failed for {path}: {source}")]
    Decode {
        /// Path of the failing entry.
        path: String,
        /// Stage that failed.
        stage: DecodeStage,
        /// Underlying decoder error.
        source: io::Error,
    },

    /// An entry could not be compressed.
    #[error("gzip encode failed for {path}: {source}")]
    Encode {
        /// Path of the failing entry.
        path: String,
        /// Underlying encoder error.
        source: io::Error,
    },

    /// Host file system I/O failed.
    #[error("{op} {path}: {source}")]
    Io {
        /// Operation that failed.
        op: &'static str,
        /// Host path involved.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An open handle outlived the table it was opened from.
    #[error("{path}: file system was dropped while the file was open")]
    Detached {
        /// Path of the handle.
        path: String,
    },

    /// A serialized archive could not be loaded.
    #[error("invalid archive: {0}")]
    Format(#[from] FormatError),
}

impl Error {
    pub(crate) fn not_found(op: &'static str, path: impl Into<String>) -> Self {
        Self::NotFound {
            op,
            path: path.into(),
        }
    }

    pub(crate) fn io(op: &'static str, path: impl fmt::Display, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_string(),
            source,
        }
    }

    /// Check if this is a lookup miss, in the table or on the host.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path, .. }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::Io { path, .. }
            | Self::Detached { path } => Some(path),
            Self::Format(_) => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::NotFound { .. } => io::ErrorKind::NotFound,
            Error::Io { source, .. } => source.kind(),
            Error::Decode { .. } | Error::Format(_) => io::ErrorKind::InvalidData,
            Error::Encode { .. } | Error::Detached { .. } => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
