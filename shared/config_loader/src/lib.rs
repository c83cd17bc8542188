//! # Config Loader
//!
//! Locates, reads and splits `key=value` configuration files. Interpreting
//! the values is left to the consumer.
//!
//! ```no_run
//! use config_loader::{find_config_file, load_config_file, parse_entries};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = find_config_file("snapcam.conf")?;
//!     let content = load_config_file(&path)?;
//!     for entry in parse_entries(&content)? {
//!         println!("{} = {}", entry.key, entry.value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ConfigError, Result};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the search path.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// One `key=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// 1-based line number in the source text.
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Reads the whole file into a string.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))
}

/// Looks for `filename` in the usual places.
///
/// Search order:
/// 1. The path in the `CONFIG_PATH` environment variable (if it exists)
/// 2. `./config/{filename}`
/// 3. `./{filename}`
pub fn find_config_file(filename: &str) -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let path_buf = PathBuf::from(&path);
        if path_buf.is_file() {
            return Ok(path_buf);
        }
    }

    find_in_dir(Path::new("."), filename)
}

/// Looks for `{dir}/config/{filename}`, then `{dir}/{filename}`.
pub fn find_in_dir(dir: &Path, filename: &str) -> Result<PathBuf> {
    let candidates = [dir.join("config").join(filename), dir.join(filename)];

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            ConfigError::FileNotFound(format!(
                "'{}' not found. Searched: {} env var, {}/config/{}, {}/{}",
                filename,
                CONFIG_PATH_ENV,
                dir.display(),
                filename,
                dir.display(),
                filename
            ))
        })
}

/// Splits configuration text into entries.
///
/// Blank lines and lines starting with `#` are skipped; keys and values are
/// trimmed. Values may contain `=` (only the first one separates).
pub fn parse_entries(content: &str) -> Result<Vec<ConfigEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Parse {
                line: index + 1,
                content: line.to_string(),
            });
        };

        entries.push(ConfigEntry {
            line: index + 1,
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        });
    }

    Ok(entries)
}
