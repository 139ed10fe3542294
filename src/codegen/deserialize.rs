//! Archive → table deserialization.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::error::FormatError;
use super::serialize::{tag, MAGIC, VERSION};
use crate::compress::Compression;
use crate::config::Config;
use crate::error::Result;
use crate::file::{normalize, timestamp, BincludeFile, Mode};
use crate::fs::FileSystem;

impl FileSystem {
    /// Load a table produced by [`FileSystem::encode`], with default config.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with_config(bytes, Config::default())
    }

    /// Load a table produced by [`FileSystem::encode`].
    ///
    /// Compressed entries stay compressed; call
    /// [`decompress`](FileSystem::decompress) to restore raw content.
    pub fn decode_with_config(bytes: &[u8], config: Config) -> Result<Self> {
        let entries = decode_entries(bytes)?;
        tracing::debug!(entries = entries.len(), bytes = bytes.len(), "loaded archive");
        Ok(Self::with_config(config, entries))
    }
}

/// Parse every record of an archive.
fn decode_entries(bytes: &[u8]) -> std::result::Result<Vec<(String, BincludeFile)>, FormatError> {
    let mut reader = Reader { bytes, pos: 0 };

    if reader.take(MAGIC.len())? != MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = reader.u8()?;
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    let count = reader.u32()? as usize;

    // Cap the pre-allocation: the count is untrusted
    let mut entries = Vec::with_capacity(count.min(4096));
    let mut seen = FxHashSet::default();
    for index in 0..count {
        let (path, file) = decode_record(&mut reader, index)?;
        if !seen.insert(path.clone()) {
            return Err(FormatError::DuplicatePath(path));
        }
        entries.push((path, file));
    }

    let rest = reader.bytes.len() - reader.pos;
    if rest != 0 {
        return Err(FormatError::TrailingBytes(rest));
    }
    Ok(entries)
}

fn decode_record(
    reader: &mut Reader<'_>,
    index: usize,
) -> std::result::Result<(String, BincludeFile), FormatError> {
    let mut path = None;
    let mut filename = None;
    let mut mode = None;
    let mut mod_time = None;
    let mut compression = None;
    let mut content: Option<&[u8]> = None;

    loop {
        let field = reader.u8()?;
        if field == tag::END {
            break;
        }
        let len = reader.u32()? as usize;
        let value = reader.take(len)?;
        match field {
            tag::PATH => path = Some(utf8(value, "path")?),
            tag::FILENAME => filename = Some(utf8(value, "filename")?),
            tag::MODE => mode = Some(Mode::from_bits(u32::from_le_bytes(fixed(value, "mode")?))),
            tag::MOD_TIME => {
                let raw: [u8; 12] = fixed(value, "mod_time")?;
                let mut secs = [0u8; 8];
                let mut nanos = [0u8; 4];
                secs.copy_from_slice(&raw[..8]);
                nanos.copy_from_slice(&raw[8..]);
                mod_time = Some(timestamp(i64::from_le_bytes(secs), u32::from_le_bytes(nanos)));
            }
            tag::COMPRESSION => {
                let [raw]: [u8; 1] = fixed(value, "compression")?;
                compression =
                    Some(Compression::from_tag(raw).ok_or(FormatError::UnknownCompression(raw))?);
            }
            tag::CONTENT => content = Some(value),
            // Fields from newer writers are skipped
            _ => tracing::trace!(field, len, index, "skipping unknown archive field"),
        }
    }

    let missing = |field| FormatError::MissingField { index, field };
    // Keys are compared the way the table stores them
    let path = normalize(&path.ok_or_else(|| missing("path"))?).to_string();
    let file = BincludeFile {
        filename: filename.ok_or_else(|| missing("filename"))?,
        mode: mode.ok_or_else(|| missing("mode"))?,
        mod_time: mod_time.ok_or_else(|| missing("mod_time"))?,
        compression: compression.unwrap_or_default(),
        content: Arc::from(content.unwrap_or_default()),
    };
    Ok((path, file))
}

fn utf8(value: &[u8], field: &'static str) -> std::result::Result<String, FormatError> {
    String::from_utf8(value.to_vec()).map_err(|_| FormatError::InvalidUtf8(field))
}

fn fixed<const N: usize>(
    value: &[u8],
    field: &'static str,
) -> std::result::Result<[u8; N], FormatError> {
    value.try_into().map_err(|_| FormatError::BadLength {
        field,
        len: value.len(),
    })
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> std::result::Result<&'a [u8], FormatError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(FormatError::Truncated { offset: self.pos })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> std::result::Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> std::result::Result<u32, FormatError> {
        let raw = self.take(4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}
