//! Generated table literals compiled back into a program.
//!
//! The files under `fixtures/` are the exact output of
//! `FileSystem::to_rust_static` for the tables built here. Each test checks
//! the generator still produces that text, then uses the compiled static.

use binclude::{BincludeFile, Compression, FileSystem, Mode, timestamp};

/// `b"hello"` as a gzip member with a single stored deflate block.
const HELLO_GZIP: &[u8] = &[
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x01, 0x05, 0x00, 0xfa, 0xff,
    b'h', b'e', b'l', b'l', b'o', 0x86, 0xa6, 0x10, 0x36, 0x05, 0x00, 0x00, 0x00,
];

mod assets {
    include!("fixtures/assets.rs");
}

mod corrupt {
    include!("fixtures/corrupt.rs");
}

fn assets_table() -> FileSystem {
    let mut page = BincludeFile::new(
        "café.txt",
        Mode::file(0o600),
        timestamp(1_600_000_000, 7),
        HELLO_GZIP,
    );
    page.compression = Compression::Gzip;

    FileSystem::from_entries([
        (
            "bytes.bin",
            BincludeFile::new(
                "bytes.bin",
                Mode::file(0o644),
                timestamp(-5, 500),
                &[0x00u8, 0xff, b'\\', b'\''][..],
            ),
        ),
        ("docs", BincludeFile::directory("docs", 0o755, timestamp(0, 0))),
        ("docs/café.txt", page),
    ])
}

fn corrupt_table() -> FileSystem {
    let mut bad = BincludeFile::new(
        "bad.txt",
        Mode::file(0o644),
        timestamp(0, 0),
        &b"garbage"[..],
    );
    bad.compression = Compression::Gzip;
    FileSystem::from_entries([("bad.txt", bad)])
}

#[test]
fn test_fixtures_match_generator() {
    assert_eq!(
        assets_table().to_rust_static("ASSETS", false),
        include_str!("fixtures/assets.rs")
    );
    assert_eq!(
        corrupt_table().to_rust_static("CORRUPT", true),
        include_str!("fixtures/corrupt.rs")
    );
}

#[test]
fn test_literal_rebuilds_identical_table() {
    let source = assets_table();
    let compiled = &*assets::ASSETS;

    assert_eq!(compiled.paths(), source.paths());
    assert_eq!(compiled.encode().unwrap(), source.encode().unwrap());

    let info = compiled.stat("bytes.bin").unwrap();
    assert_eq!(info.mod_time(), timestamp(-5, 500));
    assert_eq!(compiled.read_file("bytes.bin").unwrap(), [0x00, 0xff, b'\\', b'\'']);
    assert!(compiled.stat("docs").unwrap().is_dir());
    assert_eq!(compiled.read_dir("docs").unwrap()[0].name(), "café.txt");
}

#[test]
fn test_literal_compressed_content_decodes() {
    // Clones share the static's table, so decompress a separate copy
    let compiled = FileSystem::decode(&assets::ASSETS.encode().unwrap()).unwrap();
    assert_eq!(
        compiled.entry("docs/café.txt").unwrap().compression,
        Compression::Gzip
    );

    compiled.decompress().unwrap();
    assert_eq!(compiled.read_file("docs/café.txt").unwrap(), b"hello");
}

#[test]
#[should_panic(expected = "embedded table failed to decompress")]
fn test_corrupt_static_panics_on_first_use() {
    let _ = corrupt::CORRUPT.len();
}
