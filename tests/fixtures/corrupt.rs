pub static CORRUPT: ::std::sync::LazyLock<::binclude::FileSystem> =
    ::std::sync::LazyLock::new(|| {
    let fs = ::binclude::FileSystem::from_entries([
    ("bad.txt", ::binclude::BincludeFile {
        filename: ::std::string::String::from("bad.txt"),
        mode: ::binclude::Mode::from_bits(0o100644),
        mod_time: ::binclude::timestamp(0, 0),
        compression: ::binclude::Compression::Gzip,
        content: ::std::sync::Arc::from(&b"garbage"[..]),
    }),
]);
    fs.decompress().expect("embedded table failed to decompress");
    fs
});
