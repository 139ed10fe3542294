//! The embedded file table.
//!
//! # Locking
//!
//! ```text
//! FileSystem
//! ├── config: Config                     (fixed at construction)
//! └── files: Arc<RwLock<Files>>
//!       ├── read lock  ◄── open / stat / read_file / read_dir / encode / to_rust
//!       ├── write lock ◄── compress / decompress
//!       └── Weak       ◄── EmbeddedFile::read_dir (sibling enumeration only)
//! ```
//!
//! Every operation takes the lock it needs internally. No lock is held while
//! another operation that takes it is called.

mod builder;
mod host;

pub use builder::FileSystemBuilder;
pub use host::HostFile;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::compress::{gzip_decode, gzip_encode, should_compress, Compression};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::file::{normalize, BincludeFile, EmbeddedFile, FileInfo, OpenFile};

/// Map from normalized table path to entry.
pub type Files = FxHashMap<String, BincludeFile>;

/// A read-only file system backed by files embedded in the program.
///
/// Cloning is cheap and clones share the same table.
///
/// # Example
///
/// ```
/// use binclude::{FileSystem, Mode, timestamp};
///
/// let fs = FileSystem::builder()
///     .file("a.txt", "hello", Mode::file(0o644), timestamp(0, 0))
///     .file("dir/b.txt", "world", Mode::file(0o644), timestamp(0, 0))
///     .build();
///
/// assert_eq!(fs.read_file("a.txt").unwrap(), b"hello");
/// let names: Vec<_> = fs.read_dir("dir").unwrap().iter().map(|i| i.name().to_string()).collect();
/// assert_eq!(names, ["b.txt"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    config: Config,
    files: Arc<RwLock<Files>>,
}

impl FileSystem {
    /// Start building a table from file tuples.
    pub fn builder() -> FileSystemBuilder {
        FileSystemBuilder::new()
    }

    /// Create a file system from already keyed entries, with default config.
    ///
    /// This is what generated table literals call. Keys are normalized; later
    /// duplicates replace earlier ones.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, BincludeFile)>,
        K: AsRef<str>,
    {
        Self::with_config(Config::default(), entries)
    }

    /// Create a file system from keyed entries and an explicit config.
    pub fn with_config<I, K>(config: Config, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, BincludeFile)>,
        K: AsRef<str>,
    {
        let files: Files = entries
            .into_iter()
            .map(|(path, entry)| (normalize(path.as_ref()).to_string(), entry))
            .collect();
        Self {
            config,
            files: Arc::new(RwLock::new(files)),
        }
    }

    /// Return this table with another config.
    ///
    /// Clones made before the call keep their config but share the table.
    pub fn set_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether lookups go to the host instead of the table.
    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    // =========================================================================
    // Table Inspection
    // =========================================================================

    /// Number of entries, directories included.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// Whether `path` is present in the table.
    pub fn contains(&self, path: &str) -> bool {
        self.files.read().contains_key(normalize(path))
    }

    /// All table paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.read().keys().cloned().collect();
        paths.sort_unstable();
        paths
    }

    /// A copy of the entry stored at `path`.
    pub fn entry(&self, path: &str) -> Option<BincludeFile> {
        self.files.read().get(normalize(path)).cloned()
    }

    /// Sorted `(path, entry)` pairs. Content is shared, not copied.
    pub(crate) fn sorted_entries(&self) -> Vec<(String, BincludeFile)> {
        let files = self.files.read();
        let mut entries: Vec<_> = files
            .iter()
            .map(|(path, entry)| (path.clone(), entry.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    // =========================================================================
    // File Access
    // =========================================================================

    /// Open a file.
    ///
    /// A leading `./` is ignored. In development mode the file is opened on
    /// the host under [`Config::host_root`].
    pub fn open(&self, name: &str) -> Result<Box<dyn OpenFile>> {
        if self.config.debug {
            let host_path = self.config.host_path(name);
            return Ok(Box::new(HostFile::open(name, host_path)?));
        }

        let name = normalize(name);
        let files = self.files.read();
        let entry = files.get(name).ok_or_else(|| Error::not_found("open", name))?;
        Ok(Box::new(EmbeddedFile::new(
            name,
            entry,
            Arc::downgrade(&self.files),
        )))
    }

    /// Metadata of a file.
    pub fn stat(&self, name: &str) -> Result<FileInfo> {
        let mut file = self.open(name)?;
        let info = file.stat();
        file.close()?;
        info
    }

    /// Read a whole file.
    ///
    /// Reaching the end of the content is not an error.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.open(name)?;
        let mut content = Vec::new();
        let read = file
            .read_to_end(&mut content)
            .map_err(|e| Error::io("read", file.name(), e));
        file.close()?;
        read?;
        Ok(content)
    }

    /// Read a whole file as UTF-8 text.
    pub fn read_to_string(&self, name: &str) -> Result<String> {
        let bytes = self.read_file(name)?;
        String::from_utf8(bytes).map_err(|e| {
            Error::io(
                "read",
                normalize(name),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    /// List a directory, sorted by name.
    ///
    /// Naming a regular file lists the directory containing it.
    pub fn read_dir(&self, name: &str) -> Result<Vec<FileInfo>> {
        let mut file = self.open(name)?;
        let listed = file.read_dir(None);
        file.close()?;
        let mut infos = listed?;
        infos.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(infos)
    }

    /// Copy a file out of the table onto the host, keeping its permission bits.
    ///
    /// Nothing is created when the source cannot be opened or stat'ed. A copy
    /// that fails midway is not rolled back.
    pub fn copy_file(&self, embedded_path: &str, host_path: impl AsRef<Path>) -> Result<()> {
        let host_path = host_path.as_ref();
        let mut src = self.open(embedded_path)?;
        let info = src.stat()?;
        let written = host::write_host_file(&mut src, host_path, info.mode().perm());
        src.close()?;
        let written = written?;
        tracing::debug!(
            from = embedded_path,
            to = %host_path.display(),
            bytes = written,
            "copied embedded file to host"
        );
        Ok(())
    }

    // =========================================================================
    // Compression Passes
    // =========================================================================

    /// Compress every eligible entry with `algorithm`.
    ///
    /// Skips directories, entries that are already compressed, and names with
    /// an [excluded extension](crate::compress::EXCLUDED_EXTENSIONS).
    /// [`Compression::None`] does nothing. On error no entry is changed.
    pub fn compress(&self, algorithm: Compression) -> Result<()> {
        if algorithm == Compression::None {
            return Ok(());
        }
        let level = self.config.compression_level;

        let mut files = self.files.write();
        let pending: Vec<(&String, &BincludeFile)> = files
            .iter()
            .filter(|(_, f)| {
                f.compression == Compression::None && !f.is_dir() && should_compress(&f.filename)
            })
            .collect();

        let encoded = transform(pending, |path, file| {
            gzip_encode(&file.content, level).map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })
        })?;

        let count = encoded.len();
        commit(&mut files, encoded, algorithm);
        tracing::debug!(count, %algorithm, "compressed embedded files");
        Ok(())
    }

    /// Restore raw content for every compressed entry.
    ///
    /// Raw entries are untouched. On error no entry is changed.
    pub fn decompress(&self) -> Result<()> {
        let mut files = self.files.write();
        let pending: Vec<(&String, &BincludeFile)> = files
            .iter()
            .filter(|(_, f)| f.compression == Compression::Gzip)
            .collect();

        let decoded = transform(pending, |path, file| {
            gzip_decode(&file.content).map_err(|(stage, source)| Error::Decode {
                path: path.clone(),
                stage,
                source,
            })
        })?;

        let count = decoded.len();
        commit(&mut files, decoded, Compression::None);
        tracing::debug!(count, "decompressed embedded files");
        Ok(())
    }
}

/// Run `f` over every pending entry, stopping at the first error.
fn transform<F>(pending: Vec<(&String, &BincludeFile)>, f: F) -> Result<Vec<(String, Vec<u8>)>>
where
    F: Fn(&String, &BincludeFile) -> Result<Vec<u8>> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pending
            .into_par_iter()
            .map(|(path, file)| f(path, file).map(|content| (path.clone(), content)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pending
            .into_iter()
            .map(|(path, file)| f(path, file).map(|content| (path.clone(), content)))
            .collect()
    }
}

fn commit(files: &mut Files, updates: Vec<(String, Vec<u8>)>, compression: Compression) {
    for (path, content) in updates {
        if let Some(file) = files.get_mut(&path) {
            file.content = content.into();
            file.compression = compression;
        }
    }
}
