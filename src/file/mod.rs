//! Embedded files, their metadata and open handles.
//!
//! ```text
//! FileSystem table
//! └── "dir/b.txt" ──► BincludeFile   (stored entry: name, mode, mtime, content)
//!                        │
//!                        ├── stat() ──► FileInfo      (read-only snapshot)
//!                        │
//!                        └── open() ──► EmbeddedFile  (cursor + path + Weak table)
//! ```

mod entry;
mod handle;
mod info;
mod path;

pub use entry::{timestamp, BincludeFile, Mode};
pub use handle::{EmbeddedFile, OpenFile};
pub use info::FileInfo;
pub use path::{base_name, normalize, parent, ROOT};

pub(crate) use handle::{closed_error, next_page};
pub(crate) use path::ancestors;
