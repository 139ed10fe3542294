//! Open file handles.
//!
//! [`FileSystem::open`](crate::FileSystem::open) hands out a boxed
//! [`OpenFile`]: an [`EmbeddedFile`] reading from the table, or a
//! [`HostFile`](crate::fs::HostFile) in development mode.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::entry::BincludeFile;
use super::info::FileInfo;
use super::path;
use crate::error::{Error, Result};
use crate::fs::Files;

// =============================================================================
// OpenFile Trait
// =============================================================================

/// Capabilities of an open file: read, seek, close, stat and list directory.
///
/// Mirrors what callers expect from a file opened on disk, so code can be
/// written once against either the embedded table or the host file system.
pub trait OpenFile: Read + Seek + Send {
    /// Path of the file as presented to `open`.
    fn name(&self) -> &str;

    /// Detach the file from its data. Idempotent.
    ///
    /// Reads and seeks after `close` fail.
    fn close(&mut self) -> Result<()>;

    /// Metadata of the open file.
    fn stat(&self) -> Result<FileInfo>;

    /// List the directory this file designates.
    ///
    /// A directory lists its children; a regular file lists its siblings.
    /// Entries come back sorted by name. With `Some(n)` at most `n` entries
    /// are returned and the next call continues after them; an exhausted
    /// listing returns an empty vector. `None` returns everything remaining.
    fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<FileInfo>>;
}

/// Take the next page of a sorted listing.
pub(crate) fn next_page(
    mut entries: Vec<FileInfo>,
    offset: &mut usize,
    limit: Option<usize>,
) -> Vec<FileInfo> {
    let start = (*offset).min(entries.len());
    let end = match limit {
        Some(n) => start.saturating_add(n).min(entries.len()),
        None => entries.len(),
    };
    *offset = end;
    entries.truncate(end);
    entries.drain(..start);
    entries
}

pub(crate) fn closed_error() -> io::Error {
    io::Error::other("file already closed")
}

// =============================================================================
// EmbeddedFile - Handle Over a Table Entry
// =============================================================================

/// An open embedded file.
///
/// Holds a cursor over the entry's content and a non-owning reference to the
/// table it came from, used only to enumerate siblings.
#[derive(Debug)]
pub struct EmbeddedFile {
    path: String,
    info: FileInfo,
    cursor: Option<Cursor<Arc<[u8]>>>,
    table: Weak<RwLock<Files>>,
    dir_offset: usize,
}

impl EmbeddedFile {
    pub(crate) fn new(path: &str, entry: &BincludeFile, table: Weak<RwLock<Files>>) -> Self {
        Self {
            path: path.to_string(),
            info: entry.stat(),
            cursor: Some(Cursor::new(Arc::clone(&entry.content))),
            table,
            dir_offset: 0,
        }
    }

    /// Length of the stored content. Not affected by reads or seeks.
    pub fn size(&self) -> u64 {
        self.info.size()
    }

    /// Whether [`close`](OpenFile::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }

    fn cursor(&mut self) -> io::Result<&mut Cursor<Arc<[u8]>>> {
        self.cursor.as_mut().ok_or_else(closed_error)
    }

    fn list_root(&self) -> &str {
        if self.info.is_dir() {
            &self.path
        } else {
            path::parent(&self.path)
        }
    }
}

impl Read for EmbeddedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor()?.read(buf)
    }
}

impl Seek for EmbeddedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor()?.seek(pos)
    }
}

impl OpenFile for EmbeddedFile {
    fn name(&self) -> &str {
        &self.path
    }

    fn close(&mut self) -> Result<()> {
        self.cursor = None;
        Ok(())
    }

    fn stat(&self) -> Result<FileInfo> {
        Ok(self.info.clone())
    }

    fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<FileInfo>> {
        let table = self.table.upgrade().ok_or_else(|| Error::Detached {
            path: self.path.clone(),
        })?;
        let entries = list_children(&table.read(), self.list_root());
        Ok(next_page(entries, &mut self.dir_offset, limit))
    }
}

/// Metadata of every entry directly inside `root`, sorted by name.
fn list_children(files: &Files, root: &str) -> Vec<FileInfo> {
    let mut infos: Vec<FileInfo> = files
        .iter()
        .filter(|(key, _)| key.as_str() != root && path::parent(key) == root)
        .map(|(_, entry)| entry.stat())
        .collect();
    infos.sort_by(|a, b| a.name().cmp(b.name()));
    infos
}
