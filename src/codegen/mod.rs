//! Table serialization.
//!
//! Two deterministic encodings of a [`FileSystem`](crate::FileSystem), both
//! ordered by path so identical inputs always produce identical output:
//!
//! - [`source`] - Rust literal text ([`ToRust`]), spliced into generated code
//! - [`serialize`] / [`deserialize`] - versioned tagged-record archive
//! - [`builder`] - struct/call/array formatting helpers
//! - [`error`] - Error types

mod builder;
mod deserialize;
mod error;
mod serialize;
mod source;

// Archive
pub use serialize::{MAGIC, VERSION};

// Source generation
pub use source::{ToRust, CRATE_PATH, DECOMPRESS_PANIC};

// Builders
pub use builder::{call, format_array, tuple, StructBuilder};

// Errors
pub use error::FormatError;
