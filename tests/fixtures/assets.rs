pub static ASSETS: ::std::sync::LazyLock<::binclude::FileSystem> =
    ::std::sync::LazyLock::new(|| ::binclude::FileSystem::from_entries([
    ("bytes.bin", ::binclude::BincludeFile {
        filename: ::std::string::String::from("bytes.bin"),
        mode: ::binclude::Mode::from_bits(0o100644),
        mod_time: ::binclude::timestamp(-5, 500),
        compression: ::binclude::Compression::None,
        content: ::std::sync::Arc::from(&b"\x00\xff\\\'"[..]),
    }),
    ("docs", ::binclude::BincludeFile {
        filename: ::std::string::String::from("docs"),
        mode: ::binclude::Mode::from_bits(0o40755),
        mod_time: ::binclude::timestamp(0, 0),
        compression: ::binclude::Compression::None,
        content: ::std::sync::Arc::from(&b""[..]),
    }),
    ("docs/café.txt", ::binclude::BincludeFile {
        filename: ::std::string::String::from("café.txt"),
        mode: ::binclude::Mode::from_bits(0o100600),
        mod_time: ::binclude::timestamp(1600000000, 7),
        compression: ::binclude::Compression::Gzip,
        content: ::std::sync::Arc::from(&b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x00\xff\x01\x05\x00\xfa\xffhello\x86\xa6\x106\x05\x00\x00\x00"[..]),
    }),
]));
