//! # binclude
//!
//! Embed files into a compiled program and read them back at runtime through
//! a file system interface that behaves like the disk.
//!
//! Build tooling walks the asset directories, feeds every file to a
//! [`FileSystemBuilder`], optionally compresses the table, and emits it as
//! Rust source ([`codegen::ToRust`]) or as a versioned archive
//! ([`FileSystem::encode`]). At program start the generated literal or
//! [`FileSystem::decode`] rebuilds the same table.
//!
//! ## Quick Start
//!
//! ```
//! use binclude::{Compression, FileSystem, Mode, timestamp};
//!
//! // Build time
//! let fs = FileSystem::builder()
//!     .file("templates/index.html", "<h1>hi</h1>", Mode::file(0o644), timestamp(0, 0))
//!     .file("certs/ca.pem", "-----BEGIN CERTIFICATE-----", Mode::file(0o600), timestamp(0, 0))
//!     .build();
//! fs.compress(Compression::Gzip)?;
//! let archive = fs.encode()?;
//!
//! // Run time
//! let assets = FileSystem::decode(&archive)?;
//! assets.decompress()?;
//! assert_eq!(assets.read_file("templates/index.html")?, b"<h1>hi</h1>");
//! assert_eq!(assets.read_dir("certs")?[0].name(), "ca.pem");
//! # Ok::<(), binclude::Error>(())
//! ```
//!
//! ## Development Mode
//!
//! With [`Config::debug`] set, every lookup goes straight to the host file
//! system under [`Config::host_root`], so assets can be edited without
//! rebuilding:
//!
//! ```ignore
//! let fs = generated::ASSETS.clone().set_config(binclude::Config::from_env());
//! ```
//!
//! ## Modules
//!
//! - [`mod@fs`]: the table and its operations
//! - [`mod@file`]: entries, metadata and open handles
//! - [`compress`]: gzip codec and exclusion rules
//! - [`codegen`]: Rust literal and archive serialization
//! - [`config`]: runtime configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codegen;
pub mod compress;
pub mod config;
pub mod error;
pub mod file;
pub mod fs;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use binclude::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        timestamp, BincludeFile, Compression, Config, Error, FileInfo, FileSystem, Mode,
        OpenFile, Result,
    };
}

// =============================================================================
// Table and Files
// =============================================================================

pub use fs::{FileSystem, FileSystemBuilder, Files, HostFile};

pub use file::{timestamp, BincludeFile, EmbeddedFile, FileInfo, Mode, OpenFile};

// =============================================================================
// Infrastructure
// =============================================================================

pub use compress::Compression;
pub use config::{Config, ConfigBuilder};
pub use error::{DecodeStage, Error, Result};
