//! Builder pattern for [`FileSystem`].
//!
//! This is the build-time side of the table: a scanner hands over
//! `(path, bytes, mode, mtime)` tuples and gets a table back, ready to be
//! compressed and serialized.

use chrono::{DateTime, Utc};

use super::{FileSystem, Files};
use crate::config::Config;
use crate::file::{ancestors, base_name, normalize, BincludeFile, Mode};

/// Permissions given to directories created implicitly for nested files.
const IMPLIED_DIR_PERM: u32 = 0o755;

/// Builder for a [`FileSystem`].
///
/// Use [`FileSystem::builder`] to create one.
#[derive(Debug, Default)]
pub struct FileSystemBuilder {
    config: Config,
    files: Files,
}

impl FileSystemBuilder {
    /// Create an empty builder with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this configuration for the built file system.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add a regular file.
    ///
    /// Missing parent directories are added with mode `0o755` and the file's
    /// modification time. A later file at the same path replaces the earlier.
    pub fn file(
        mut self,
        path: &str,
        content: impl AsRef<[u8]>,
        mode: Mode,
        mod_time: DateTime<Utc>,
    ) -> Self {
        self.insert_file(path, content.as_ref(), mode, mod_time);
        self
    }

    /// Add a directory.
    ///
    /// Replaces a directory added implicitly for a nested file.
    pub fn dir(mut self, path: &str, perm: u32, mod_time: DateTime<Utc>) -> Self {
        self.insert_dir(path, perm, mod_time);
        self
    }

    /// Add a regular file in place.
    pub fn insert_file(&mut self, path: &str, content: &[u8], mode: Mode, mod_time: DateTime<Utc>) {
        let path = normalize(path);
        self.ensure_parents(path, mod_time);
        let entry = BincludeFile::new(base_name(path), mode, mod_time, content.to_vec());
        self.files.insert(path.to_string(), entry);
    }

    /// Add a directory in place.
    pub fn insert_dir(&mut self, path: &str, perm: u32, mod_time: DateTime<Utc>) {
        let path = normalize(path);
        self.ensure_parents(path, mod_time);
        let entry = BincludeFile::directory(base_name(path), perm, mod_time);
        self.files.insert(path.to_string(), entry);
    }

    /// Add an already built entry at `path`, without implied parents.
    pub fn entry(mut self, path: &str, entry: BincludeFile) -> Self {
        self.files.insert(normalize(path).to_string(), entry);
        self
    }

    /// Number of entries added so far, implied directories included.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Build the file system.
    pub fn build(self) -> FileSystem {
        FileSystem::with_config(self.config, self.files)
    }

    fn ensure_parents(&mut self, path: &str, mod_time: DateTime<Utc>) {
        for dir in ancestors(path) {
            self.files
                .entry(dir.to_string())
                .or_insert_with(|| {
                    BincludeFile::directory(base_name(dir), IMPLIED_DIR_PERM, mod_time)
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::timestamp;

    #[test]
    fn test_implied_directories() {
        let builder = FileSystemBuilder::new().file(
            "a/b/c.txt",
            "deep",
            Mode::file(0o644),
            timestamp(5, 0),
        );
        assert_eq!(builder.len(), 3);

        let fs = builder.build();
        assert_eq!(fs.paths(), ["a", "a/b", "a/b/c.txt"]);
        let b = fs.entry("a/b").unwrap();
        assert!(b.is_dir());
        assert_eq!(b.filename, "b");
        assert_eq!(b.mode, Mode::dir(0o755));
        assert_eq!(b.mod_time, timestamp(5, 0));
    }

    #[test]
    fn test_explicit_dir_replaces_implied() {
        let fs = FileSystemBuilder::new()
            .file("d/x", "x", Mode::file(0o644), timestamp(0, 0))
            .dir("d", 0o700, timestamp(9, 0))
            .build();
        assert_eq!(fs.entry("d").unwrap().mode, Mode::dir(0o700));
    }

    #[test]
    fn test_paths_are_normalized() {
        let fs = FileSystemBuilder::new()
            .file("./top.txt", "t", Mode::file(0o644), timestamp(0, 0))
            .dir("assets/", 0o755, timestamp(0, 0))
            .build();
        assert_eq!(fs.paths(), ["assets", "top.txt"]);
        assert_eq!(fs.entry("top.txt").unwrap().filename, "top.txt");
    }

    #[test]
    fn test_config_is_carried() {
        let config = Config::builder().compression_level(1).build();
        let fs = FileSystemBuilder::new().config(config.clone()).build();
        assert_eq!(fs.config(), &config);
        assert!(fs.is_empty());
    }
}
