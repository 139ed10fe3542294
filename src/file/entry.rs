//! Embedded file entries.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::info::FileInfo;
use crate::compress::Compression;

// =============================================================================
// Mode - Permission and Type Bits
// =============================================================================

/// File mode: permission bits plus file type bits, unix layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mode(u32);

impl Mode {
    /// Directory type bit (`S_IFDIR`).
    pub const DIR: u32 = 0o040_000;
    /// Regular file type bit (`S_IFREG`).
    pub const REGULAR: u32 = 0o100_000;
    /// Mask of the permission bits.
    pub const PERM_MASK: u32 = 0o777;

    /// Wrap raw mode bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Regular file with the given permissions.
    pub const fn file(perm: u32) -> Self {
        Self(Self::REGULAR | (perm & Self::PERM_MASK))
    }

    /// Directory with the given permissions.
    pub const fn dir(perm: u32) -> Self {
        Self(Self::DIR | (perm & Self::PERM_MASK))
    }

    /// Raw mode bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Permission bits only.
    pub const fn perm(self) -> u32 {
        self.0 & Self::PERM_MASK
    }

    /// Whether the directory type bit is set.
    pub const fn is_dir(self) -> bool {
        self.0 & 0o170_000 == Self::DIR
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#o}", self.0)
    }
}

/// Build a timestamp from unix seconds and sub-second nanoseconds.
///
/// Used by generated table literals. Out-of-range input maps to the epoch.
pub fn timestamp(secs: i64, nanos: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}

// =============================================================================
// BincludeFile - One Embedded File
// =============================================================================

/// One embedded file.
///
/// `content` holds the gzip stream when `compression` is
/// [`Compression::Gzip`] and the raw bytes when it is [`Compression::None`].
/// Directories have empty content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BincludeFile {
    /// Base name of the file.
    pub filename: String,
    /// Permission and type bits.
    pub mode: Mode,
    /// Modification time recorded at build time.
    pub mod_time: DateTime<Utc>,
    /// Encoding of `content`.
    pub compression: Compression,
    /// Stored bytes.
    pub content: Arc<[u8]>,
}

impl BincludeFile {
    /// Create an uncompressed entry.
    pub fn new(
        filename: impl Into<String>,
        mode: Mode,
        mod_time: DateTime<Utc>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mode,
            mod_time,
            compression: Compression::None,
            content: content.into(),
        }
    }

    /// Create a directory entry.
    pub fn directory(filename: impl Into<String>, perm: u32, mod_time: DateTime<Utc>) -> Self {
        Self::new(filename, Mode::dir(perm), mod_time, Vec::<u8>::new())
    }

    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Length of the stored content (compressed length for gzip entries).
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Metadata snapshot.
    pub fn stat(&self) -> FileInfo {
        FileInfo::new(self.filename.clone(), self.mode, self.size(), self.mod_time)
    }
}
