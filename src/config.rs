//! Configuration for binclude.
//!
//! A [`Config`] is handed to [`FileSystem`](crate::FileSystem) when it is
//! constructed. There is no process-wide switch: two file systems in the same
//! process may use different modes.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that enables development mode in [`Config::from_env`].
pub const DEBUG_ENV: &str = "BINCLUDE_DEBUG";

/// Environment variable that sets the host root in [`Config::from_env`].
pub const ROOT_ENV: &str = "BINCLUDE_ROOT";

/// Default gzip level, matching `flate2::Compression::default()`.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Runtime configuration for a [`FileSystem`](crate::FileSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Development mode: every lookup goes to the host file system and the
    /// embedded table is ignored.
    pub debug: bool,
    /// Directory that embedded paths are resolved against in development mode.
    /// Empty means the current working directory.
    pub host_root: PathBuf,
    /// Gzip level (0-9) used by [`compress`](crate::FileSystem::compress).
    pub compression_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            host_root: PathBuf::new(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Config {
    /// Start a [`ConfigBuilder`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Read configuration from the environment.
    ///
    /// `BINCLUDE_DEBUG` set to `1`, `true`, `yes` or `on` enables development
    /// mode. `BINCLUDE_ROOT` sets the host root.
    pub fn from_env() -> Self {
        let mut builder = ConfigBuilder::new();
        if let Ok(value) = env::var(DEBUG_ENV) {
            builder = builder.debug(parse_flag(&value));
        }
        if let Some(root) = env::var_os(ROOT_ENV) {
            builder = builder.host_root(root);
        }
        builder.build()
    }

    /// Resolve an embedded path against the host root, using host separators.
    pub(crate) fn host_path(&self, name: &str) -> PathBuf {
        let native: PathBuf = name.split('/').filter(|c| !c.is_empty()).collect();
        if name.starts_with('/') {
            Path::new(std::path::MAIN_SEPARATOR_STR).join(native)
        } else {
            self.host_root.join(native)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    debug: Option<bool>,
    host_root: Option<PathBuf>,
    compression_level: Option<u32>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable development mode.
    ///
    /// # Example
    ///
    /// ```
    /// use binclude::config::ConfigBuilder;
    ///
    /// let config = ConfigBuilder::new().debug(true).host_root("assets").build();
    /// assert!(config.debug);
    /// ```
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Set the directory development-mode lookups are resolved against.
    pub fn host_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.host_root = Some(root.into());
        self
    }

    /// Set the gzip level. Values above 9 are clamped.
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = Some(level.min(9));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            debug: self.debug.unwrap_or(defaults.debug),
            host_root: self.host_root.unwrap_or(defaults.host_root),
            compression_level: self
                .compression_level
                .unwrap_or(defaults.compression_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.debug);
        assert_eq!(config.compression_level, 6);
        assert_eq!(config.host_root, PathBuf::new());
    }

    #[test]
    fn test_builder() {
        let config = ConfigBuilder::new()
            .debug(true)
            .host_root("/srv/assets")
            .compression_level(42)
            .build();
        assert!(config.debug);
        assert_eq!(config.host_root, PathBuf::from("/srv/assets"));
        assert_eq!(config.compression_level, 9);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_host_path() {
        let config = ConfigBuilder::new().host_root("root").build();
        assert_eq!(
            config.host_path("dir/b.txt"),
            Path::new("root").join("dir").join("b.txt")
        );
    }
}
