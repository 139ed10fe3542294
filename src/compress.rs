//! Per-file gzip compression.
//!
//! An entry is either raw ([`Compression::None`]) or a gzip stream
//! ([`Compression::Gzip`]). The table-wide passes live on
//! [`FileSystem`](crate::FileSystem); this module holds the codec and the
//! exclusion rules.

use std::fmt;
use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::DecodeStage;

/// Extensions of formats that are already compressed.
///
/// Gzipping them again costs time for little or negative gain.
pub const EXCLUDED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gz", "png", "gif", "zip"];

/// Length of the fixed gzip header.
const GZIP_HEADER_LEN: usize = 10;
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Encoding of an entry's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Raw bytes.
    #[default]
    None,
    /// A gzip stream.
    Gzip,
}

impl Compression {
    /// Stable numeric tag used by the archive format.
    pub const fn tag(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Gzip => 1,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::None),
            1 => Some(Self::Gzip),
            _ => None,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Gzip => f.write_str("gzip"),
        }
    }
}

/// Whether a file with this name is worth compressing.
///
/// Extensions are compared ASCII case-insensitively.
pub fn should_compress(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return true;
    };
    !EXCLUDED_EXTENSIONS
        .iter()
        .any(|excluded| ext.eq_ignore_ascii_case(excluded))
}

/// Gzip `data` at the given level (0-9).
///
/// The header carries no timestamp or file name, so equal input always
/// produces equal output.
pub fn gzip_encode(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
    encoder.write_all(data)?;
    encoder.finish()
}

/// Decode a gzip stream.
///
/// A missing or malformed header fails with [`DecodeStage::Open`], a corrupt
/// body with [`DecodeStage::Read`].
pub fn gzip_decode(data: &[u8]) -> Result<Vec<u8>, (DecodeStage, io::Error)> {
    if data.len() < GZIP_HEADER_LEN || data[..2] != GZIP_MAGIC {
        return Err((
            DecodeStage::Open,
            io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header"),
        ));
    }

    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    match decoder.read_to_end(&mut out) {
        Ok(_) => Ok(out),
        // The header is parsed lazily, so a failure before it is known is an open failure
        Err(err) if decoder.header().is_none() => Err((DecodeStage::Open, err)),
        Err(err) => Err((DecodeStage::Read, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_compress() {
        assert!(should_compress("index.html"));
        assert!(should_compress("README"));
        assert!(should_compress("archive.tar"));
        assert!(!should_compress("photo.jpg"));
        assert!(!should_compress("PHOTO.JPEG"));
        assert!(!should_compress("bundle.tar.gz"));
        assert!(!should_compress("logo.png"));
        assert!(!should_compress("anim.gif"));
        assert!(!should_compress("release.zip"));
    }

    #[test]
    fn test_gzip_roundtrip() {
        let data = b"hello hello hello hello hello".repeat(20);
        let encoded = gzip_encode(&data, 6).unwrap();
        assert!(encoded.len() < data.len());
        assert_eq!(&encoded[..2], &GZIP_MAGIC);
        assert_eq!(gzip_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_gzip_empty_input() {
        let encoded = gzip_encode(b"", 6).unwrap();
        assert!(gzip_decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_gzip_encode_is_deterministic() {
        let a = gzip_encode(b"same bytes", 9).unwrap();
        let b = gzip_encode(b"same bytes", 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_bad_header() {
        let (stage, _) = gzip_decode(b"hello, not gzip").unwrap_err();
        assert_eq!(stage, DecodeStage::Open);

        let (stage, _) = gzip_decode(&[0x1f]).unwrap_err();
        assert_eq!(stage, DecodeStage::Open);
    }

    #[test]
    fn test_decode_truncated_body() {
        let data = b"some content that will be cut short".repeat(10);
        let encoded = gzip_encode(&data, 6).unwrap();
        let truncated = &encoded[..encoded.len() / 2];
        let (stage, _) = gzip_decode(truncated).unwrap_err();
        assert_eq!(stage, DecodeStage::Read);
    }

    #[test]
    fn test_compression_tags() {
        for c in [Compression::None, Compression::Gzip] {
            assert_eq!(Compression::from_tag(c.tag()), Some(c));
        }
        assert_eq!(Compression::from_tag(7), None);
    }
}
