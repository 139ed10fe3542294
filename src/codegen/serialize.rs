//! Table → archive serialization.
//!
//! # Layout
//!
//! ```text
//! "BINC" | version: u8 | count: u32 LE
//! record* :
//!     field* : tag: u8 | len: u32 LE | value[len]
//!     end    : tag 0
//! ```
//!
//! Records are written in ascending path order, so equal tables always encode
//! to equal bytes.

use super::error::FormatError;
use crate::compress::Compression;
use crate::error::Result;
use crate::file::BincludeFile;
use crate::fs::FileSystem;

/// Archive magic.
pub const MAGIC: &[u8; 4] = b"BINC";

/// Current archive version.
pub const VERSION: u8 = 1;

/// Field tags.
pub(crate) mod tag {
    pub const END: u8 = 0;
    pub const PATH: u8 = 1;
    pub const FILENAME: u8 = 2;
    pub const MODE: u8 = 3;
    pub const MOD_TIME: u8 = 4;
    pub const COMPRESSION: u8 = 5;
    pub const CONTENT: u8 = 6;
}

impl FileSystem {
    /// Serialize the table into the versioned archive format.
    ///
    /// Load it back with [`FileSystem::decode`].
    ///
    /// Fails with [`FormatError::TooLarge`] when the table, a path or a
    /// content buffer does not fit a `u32` length header.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let entries = self.sorted_entries();
        let body: usize = entries
            .iter()
            .map(|(path, f)| path.len() + f.filename.len() + f.content.len() + 64)
            .sum();

        let mut out = Vec::with_capacity(MAGIC.len() + 5 + body);
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&length("count", entries.len())?.to_le_bytes());
        for (path, file) in &entries {
            encode_record(&mut out, path, file)?;
        }
        Ok(out)
    }
}

fn encode_record(
    out: &mut Vec<u8>,
    path: &str,
    file: &BincludeFile,
) -> std::result::Result<(), FormatError> {
    write_field(out, tag::PATH, "path", path.as_bytes())?;
    write_field(out, tag::FILENAME, "filename", file.filename.as_bytes())?;
    write_field(out, tag::MODE, "mode", &file.mode.bits().to_le_bytes())?;

    let mut time = [0u8; 12];
    time[..8].copy_from_slice(&file.mod_time.timestamp().to_le_bytes());
    time[8..].copy_from_slice(&file.mod_time.timestamp_subsec_nanos().to_le_bytes());
    write_field(out, tag::MOD_TIME, "mod_time", &time)?;

    write_field(out, tag::COMPRESSION, "compression", &[file.compression.tag()])?;
    if file.compression != Compression::None || !file.content.is_empty() {
        write_field(out, tag::CONTENT, "content", &file.content)?;
    }
    out.push(tag::END);
    Ok(())
}

fn write_field(
    out: &mut Vec<u8>,
    tag: u8,
    field: &'static str,
    value: &[u8],
) -> std::result::Result<(), FormatError> {
    let len = length(field, value.len())?;
    out.push(tag);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value);
    Ok(())
}

/// Length header for `field`. Lengths past `u32::MAX` are rejected.
fn length(field: &'static str, len: usize) -> std::result::Result<u32, FormatError> {
    u32::try_from(len).map_err(|_| FormatError::TooLarge { field, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{timestamp, Mode};

    #[test]
    fn test_header() {
        let bytes = FileSystem::default().encode().unwrap();
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(bytes[4], VERSION);
        assert_eq!(&bytes[5..9], &0u32.to_le_bytes());
        assert_eq!(bytes.len(), 9);
    }

    #[test]
    fn test_deterministic_across_insertion_order() {
        let names = ["z.txt", "a.txt", "m/n.txt", "b.bin"];
        let build = |order: &[&str]| {
            let mut builder = FileSystem::builder();
            for name in order {
                builder.insert_file(name, name.as_bytes(), Mode::file(0o644), timestamp(7, 9));
            }
            builder.build()
        };

        let forward = build(&names);
        let mut reversed = names;
        reversed.reverse();
        let backward = build(&reversed);

        assert_eq!(forward.encode().unwrap(), forward.encode().unwrap());
        assert_eq!(forward.encode().unwrap(), backward.encode().unwrap());
    }

    #[test]
    fn test_records_sorted_by_path() {
        let fs = FileSystem::builder()
            .file("b", "2", Mode::file(0o644), timestamp(0, 0))
            .file("a", "1", Mode::file(0o644), timestamp(0, 0))
            .build();
        let bytes = fs.encode().unwrap();
        // First record starts right after the header with the path field
        assert_eq!(bytes[9], tag::PATH);
        assert_eq!(&bytes[10..14], &1u32.to_le_bytes());
        assert_eq!(bytes[14], b'a');
    }

    #[test]
    fn test_length_header_bounds() {
        assert_eq!(length("content", 0), Ok(0));
        assert_eq!(length("content", u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_length_header_rejects_oversized() {
        let len = u32::MAX as usize + 1;
        assert_eq!(
            length("content", len),
            Err(FormatError::TooLarge { field: "content", len })
        );
        let err = crate::Error::from(FormatError::TooLarge { field: "path", len });
        assert!(err.to_string().contains("path"));
    }
}
