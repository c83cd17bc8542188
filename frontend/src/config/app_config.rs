//! Application Configuration
//!
//! Ambient settings for the viewer: logging, startup source and viewport.
//! Nothing about the session itself is persisted.

use capture::SourceId;
use capture::constants::dimensions::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use config_loader::{ConfigError, find_config_file, load_config_file, parse_entries};
use logging::LogLevel;
use std::path::{Path, PathBuf};

/// File name searched for by [`AppConfig::load`]
pub const CONFIG_FILE_NAME: &str = "snapcam.conf";

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the log file
    pub log_path: PathBuf,
    /// Logging level
    pub log_level: LogLevel,
    /// Echo log lines to stdout
    pub log_to_console: bool,
    /// Camera index or stream URL opened at startup
    pub default_source: SourceId,
    /// Display viewport; also the size of the blank placeholder
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Mirror the live preview
    pub mirror_preview: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("snapcam.log"),
            log_level: LogLevel::Info,
            log_to_console: false,
            default_source: SourceId::Index(0),
            viewport_width: DEFAULT_WIDTH as u32,
            viewport_height: DEFAULT_HEIGHT as u32,
            mirror_preview: false,
        }
    }
}

/// A loaded configuration plus the problems found while reading it.
///
/// The logger does not exist yet while the configuration is read, so
/// warnings are collected and logged by the caller.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Finds and loads `snapcam.conf`, falling back to defaults.
    ///
    /// Never fails: a missing file means defaults, an unreadable or
    /// malformed file means defaults plus a warning.
    pub fn load() -> LoadedConfig {
        match find_config_file(CONFIG_FILE_NAME) {
            Ok(path) => Self::load_or_default(&path),
            Err(_) => LoadedConfig {
                config: Self::default(),
                source: None,
                warnings: Vec::new(),
            },
        }
    }

    fn load_or_default(path: &Path) -> LoadedConfig {
        match Self::load_from_file(path) {
            Ok((config, warnings)) => LoadedConfig {
                config,
                source: Some(path.to_path_buf()),
                warnings,
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                source: None,
                warnings: vec![format!(
                    "Ignoring configuration {}: {}",
                    path.display(),
                    e
                )],
            },
        }
    }

    /// Loads configuration from a .conf file
    ///
    /// Format:
    /// ```text
    /// log_path=snapcam.log
    /// log_level=Info
    /// default_source=0
    /// viewport_width=640
    /// ```
    pub fn load_from_file(path: &Path) -> Result<(Self, Vec<String>), ConfigError> {
        let content = load_config_file(path)?;
        Self::from_content(&content)
    }

    /// Parses configuration text. Returns the config and any warnings.
    ///
    /// Unknown keys and invalid values are skipped with a warning; the
    /// affected setting keeps its default.
    pub fn from_content(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        for entry in parse_entries(content)? {
            let value = entry.value.as_str();
            let applied = match entry.key.as_str() {
                "log_path" => {
                    config.log_path = PathBuf::from(value);
                    true
                }
                "log_level" => set_parsed(&mut config.log_level, value),
                "log_to_console" => set_parsed(&mut config.log_to_console, value),
                "default_source" => set_parsed(&mut config.default_source, value),
                "viewport_width" => set_dimension(&mut config.viewport_width, value),
                "viewport_height" => set_dimension(&mut config.viewport_height, value),
                "mirror_preview" => set_parsed(&mut config.mirror_preview, value),
                other => {
                    warnings.push(format!(
                        "Unknown configuration key '{}' on line {} ignored",
                        other, entry.line
                    ));
                    continue;
                }
            };

            if !applied {
                warnings.push(format!(
                    "Invalid value '{}' for '{}' on line {}, keeping default",
                    value, entry.key, entry.line
                ));
            }
        }

        Ok((config, warnings))
    }

    /// Viewport as (width, height) in frame pixels
    pub fn viewport(&self) -> (i32, i32) {
        (self.viewport_width as i32, self.viewport_height as i32)
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, value: &str) -> bool {
    match value.parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}

fn set_dimension(slot: &mut u32, value: &str) -> bool {
    match value.parse::<u32>() {
        Ok(parsed) if (1..=8192).contains(&parsed) => {
            *slot = parsed;
            true
        }
        _ => false,
    }
}
