//! Rust source code generation for embedded tables.
//!
//! The generated text reconstructs an identical table when compiled into the
//! program that depends on this crate.

use chrono::{DateTime, Utc};

use super::builder::{call, format_array, tuple, StructBuilder};
use crate::compress::Compression;
use crate::file::{BincludeFile, Mode};
use crate::fs::FileSystem;

/// Path generated code uses to name this crate.
pub const CRATE_PATH: &str = "::binclude";

/// Panic message of a generated static whose table fails to decompress.
pub const DECOMPRESS_PANIC: &str = "embedded table failed to decompress";

/// Convert a value to Rust source code.
///
/// # Example
///
/// ```
/// use binclude::codegen::ToRust;
///
/// assert_eq!("hello".to_rust(), r#""hello""#);
/// assert_eq!(b"hi\n".as_slice().to_rust(), r#"b"hi\n""#);
/// ```
pub trait ToRust {
    /// Generate a Rust expression for this value.
    fn to_rust(&self) -> String;
}

// ---------------------------------------------------------------------------
// Primitive implementations
// ---------------------------------------------------------------------------

impl ToRust for str {
    fn to_rust(&self) -> String {
        // Debug output only uses escapes that are valid in string literals
        format!("{self:?}")
    }
}

impl ToRust for &str {
    fn to_rust(&self) -> String {
        (*self).to_rust()
    }
}

impl ToRust for String {
    fn to_rust(&self) -> String {
        self.as_str().to_rust()
    }
}

impl ToRust for [u8] {
    fn to_rust(&self) -> String {
        format!("b\"{}\"", self.escape_ascii())
    }
}

impl ToRust for Mode {
    fn to_rust(&self) -> String {
        call(&format!("{CRATE_PATH}::Mode::from_bits"), [format!("{:#o}", self.bits())])
    }
}

impl ToRust for Compression {
    fn to_rust(&self) -> String {
        let variant = match self {
            Compression::None => "None",
            Compression::Gzip => "Gzip",
        };
        format!("{CRATE_PATH}::Compression::{variant}")
    }
}

impl ToRust for DateTime<Utc> {
    fn to_rust(&self) -> String {
        call(
            &format!("{CRATE_PATH}::timestamp"),
            [
                self.timestamp().to_string(),
                self.timestamp_subsec_nanos().to_string(),
            ],
        )
    }
}

// ---------------------------------------------------------------------------
// Table implementations
// ---------------------------------------------------------------------------

impl ToRust for BincludeFile {
    fn to_rust(&self) -> String {
        self.literal("")
    }
}

impl BincludeFile {
    fn literal(&self, indent: &str) -> String {
        StructBuilder::new(format!("{CRATE_PATH}::BincludeFile"))
            .field(
                "filename",
                call("::std::string::String::from", [self.filename.to_rust()]),
            )
            .field("mode", self.mode.to_rust())
            .field("mod_time", self.mod_time.to_rust())
            .field("compression", self.compression.to_rust())
            .field(
                "content",
                call("::std::sync::Arc::from", [format!("&{}[..]", self.content.to_rust())]),
            )
            .build_multiline(indent)
    }
}

impl ToRust for FileSystem {
    /// Aggregate table literal, entries in ascending path order.
    fn to_rust(&self) -> String {
        let items: Vec<String> = self
            .sorted_entries()
            .iter()
            .map(|(path, file)| tuple(vec![path.to_rust(), file.literal("    ")]))
            .collect();
        call(
            &format!("{CRATE_PATH}::FileSystem::from_entries"),
            [format_array(items, "")],
        )
    }
}

impl FileSystem {
    /// Generate a `static` declaration that rebuilds this table on first use.
    ///
    /// ```text
    /// pub static ASSETS: ::std::sync::LazyLock<::binclude::FileSystem> =
    ///     ::std::sync::LazyLock::new(|| ::binclude::FileSystem::from_entries([ ... ]));
    /// ```
    ///
    /// With `decompress` set the declaration decompresses the table once it is
    /// built, so readers see raw content.
    ///
    /// # Panics
    ///
    /// The generated initializer panics on first access if an entry fails to
    /// decompress, with the message [`DECOMPRESS_PANIC`] followed by the
    /// decode error.
    pub fn to_rust_static(&self, name: &str, decompress: bool) -> String {
        let mut init = self.to_rust();
        if decompress {
            init = format!(
                "{{\n    let fs = {init};\n    fs.decompress().expect({});\n    fs\n}}",
                DECOMPRESS_PANIC.to_rust()
            );
        }
        format!(
            "pub static {name}: ::std::sync::LazyLock<{CRATE_PATH}::FileSystem> =\n    \
             ::std::sync::LazyLock::new(|| {init});\n"
        )
    }
}
