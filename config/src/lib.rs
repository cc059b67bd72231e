//! SQLtoSH Configuration System
//!
//! Provides YAML-based configuration for the `sqltosh` shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/sqltosh/sqltosh.yaml` (system-wide)
//! 3. `~/.config/sqltosh/sqltosh.yaml` (user)
//! 4. `./sqltosh.yaml` (project-local)
//! 5. An explicit file (`--config`), else `SQLTOSH_CONFIG=/path/to/config.yaml`;
//!    either one replaces steps 2-4
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "sqltosh> "
//!   history:
//!     file: "${HOME}/.sqltosh_history"
//!     max_entries: 500
//!
//! display:
//!   color: true
//!   header_color: magenta
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<SqltoshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from one file, skipping the search paths.
pub fn load_from_file(path: &str) -> Result<SqltoshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}
