//! Host file system access: development mode and copying out of the table.

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::file::{closed_error, next_page, FileInfo, Mode, OpenFile};

/// A file opened on the host in development mode.
#[derive(Debug)]
pub struct HostFile {
    name: String,
    path: PathBuf,
    file: Option<fs::File>,
    dir_offset: usize,
}

impl HostFile {
    /// Open `path` on the host, reporting it as `name`.
    pub(crate) fn open(name: &str, path: PathBuf) -> Result<Self> {
        tracing::debug!(name, path = %path.display(), "opening host file");
        let file = fs::File::open(&path).map_err(|e| Error::io("open", path.display(), e))?;
        Ok(Self {
            name: name.to_string(),
            path,
            file: Some(file),
            dir_offset: 0,
        })
    }

    /// Host path backing this handle.
    pub fn host_path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut fs::File> {
        self.file.as_mut().ok_or_else(closed_error)
    }
}

impl Read for HostFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file()?.read(buf)
    }
}

impl Seek for HostFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file()?.seek(pos)
    }
}

impl OpenFile for HostFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        self.file = None;
        Ok(())
    }

    fn stat(&self) -> Result<FileInfo> {
        let metadata =
            fs::metadata(&self.path).map_err(|e| Error::io("stat", self.path.display(), e))?;
        Ok(host_info(&self.path, &metadata))
    }

    fn read_dir(&mut self, limit: Option<usize>) -> Result<Vec<FileInfo>> {
        let metadata =
            fs::metadata(&self.path).map_err(|e| Error::io("readdir", self.path.display(), e))?;
        let dir = if metadata.is_dir() {
            self.path.as_path()
        } else {
            self.path.parent().unwrap_or_else(|| Path::new("."))
        };
        // `Path::parent` of a bare file name is "", which read_dir rejects
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };

        let mut infos = Vec::new();
        let entries = fs::read_dir(dir).map_err(|e| Error::io("readdir", dir.display(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("readdir", dir.display(), e))?;
            let path = entry.path();
            let metadata = entry
                .metadata()
                .map_err(|e| Error::io("readdir", path.display(), e))?;
            infos.push(host_info(&path, &metadata));
        }
        infos.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(next_page(infos, &mut self.dir_offset, limit))
    }
}

/// Convert host metadata to a [`FileInfo`].
pub(crate) fn host_info(path: &Path, metadata: &fs::Metadata) -> FileInfo {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mod_time = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_default();
    FileInfo::new(name, host_mode(metadata), metadata.len(), mod_time)
}

#[cfg(unix)]
fn host_mode(metadata: &fs::Metadata) -> Mode {
    use std::os::unix::fs::MetadataExt;
    Mode::from_bits(metadata.mode())
}

#[cfg(not(unix))]
fn host_mode(metadata: &fs::Metadata) -> Mode {
    let perm = if metadata.permissions().readonly() { 0o444 } else { 0o644 };
    if metadata.is_dir() {
        Mode::dir(perm | 0o111)
    } else {
        Mode::file(perm)
    }
}

/// Stream `src` into a new host file with exactly `perm` permission bits.
///
/// An existing destination is truncated. A copy that fails midway leaves the
/// partial destination in place.
pub(crate) fn write_host_file(src: &mut dyn Read, dst: &Path, perm: u32) -> Result<u64> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(perm);
    }

    let mut out = options
        .open(dst)
        .map_err(|e| Error::io("create", dst.display(), e))?;

    // `mode` only applies on creation and is filtered by the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dst, fs::Permissions::from_mode(perm))
            .map_err(|e| Error::io("chmod", dst.display(), e))?;
    }
    #[cfg(not(unix))]
    let _ = perm;

    io::copy(src, &mut out).map_err(|e| Error::io("copy", dst.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_host_file_read_and_stat() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "from disk").unwrap();

        let mut file = HostFile::open("note.txt", path.clone()).unwrap();
        let mut buf = String::new();
        file.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "from disk");

        let info = file.stat().unwrap();
        assert_eq!(info.name(), "note.txt");
        assert_eq!(info.size(), 9);
        assert!(!info.is_dir());

        file.close().unwrap();
        file.close().unwrap();
        assert!(file.read(&mut [0u8; 1]).is_err());
    }

    #[test]
    fn test_host_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = HostFile::open("nope", dir.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    // Opening a directory as a file is unix-only
    #[cfg(unix)]
    #[test]
    fn test_host_read_dir_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let mut handle = HostFile::open(".", dir.path().to_path_buf()).unwrap();
        let infos = handle.read_dir(None).unwrap();
        let names: Vec<_> = infos.iter().map(FileInfo::name).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c"]);
        assert!(infos[2].is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_host_file_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("out.sh");
        let written = write_host_file(&mut &b"#!/bin/sh\n"[..], &dst, 0o750).unwrap();
        assert_eq!(written, 10);
        let mode = fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
