//! Read-only file metadata.

use chrono::{DateTime, Utc};

use super::entry::Mode;

/// Metadata snapshot of an embedded or host file.
///
/// Returned by [`stat`](crate::FileSystem::stat) and directory listings.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    mode: Mode,
    size: u64,
    mod_time: DateTime<Utc>,
}

impl FileInfo {
    /// Create a metadata snapshot.
    pub fn new(name: impl Into<String>, mode: Mode, size: u64, mod_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            mode,
            size,
            mod_time,
        }
    }

    /// Base name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in bytes of the stored content.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Mode bits.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Modification time.
    pub fn mod_time(&self) -> DateTime<Utc> {
        self.mod_time
    }

    /// Abbreviation for `mode().is_dir()`.
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}
