//! Configuration for the mapping control
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/mapctl/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod datasource;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use datasource::{DataSourceConfig, FileDataSource};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BACKEND_URL: &str = "http://localhost:8088";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Analytics backend base URL (value lookups go to /api/v1/datasource/...)
    pub backend_url: String,

    /// Per-request timeout for value lookups (0 = none)
    pub request_timeout_secs: u64,

    /// Whether to run the TUI (disable for headless use)
    pub enable_tui: bool,

    /// Demo mode: canned values instead of the backend
    pub demo_mode: bool,

    /// Data source the control is bound to
    pub datasource: DataSourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_tui: true,
            demo_mode: false,
            datasource: DataSourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Lookup timeout; `0` disables it
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (every key optional)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<u64>,

    /// Optional [datasource] section
    pub datasource: Option<FileDataSource>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Environment overrides, captured once so merging stays testable
#[derive(Debug, Default)]
pub(crate) struct EnvOverrides {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<String>,
    pub datasource_id: Option<String>,
    pub no_tui: Option<String>,
    pub demo: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            backend_url: std::env::var("MAPCTL_BACKEND_URL").ok(),
            request_timeout_secs: std::env::var("MAPCTL_TIMEOUT_SECS").ok(),
            datasource_id: std::env::var("MAPCTL_DATASOURCE_ID").ok(),
            no_tui: std::env::var("MAPCTL_NO_TUI").ok(),
            demo: std::env::var("MAPCTL_DEMO").ok(),
        }
    }
}

/// "1" or "true" (any case)
fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/mapctl/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mapctl").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the config file exists but cannot be read or parsed.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Malformed array syntax (columns = [\"a\", \"b\"])");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `mapctl config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::merge(Self::load_file_config(), EnvOverrides::from_env())
    }

    /// Merge file values and environment overrides over the defaults
    pub(crate) fn merge(file: FileConfig, env: EnvOverrides) -> Self {
        let backend_url = env
            .backend_url
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        // Unparseable env values fall through to the file value
        let request_timeout_secs = env
            .request_timeout_secs
            .and_then(|v| v.parse().ok())
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        // TUI toggle and demo mode: env only (runtime flags)
        let enable_tui = env.no_tui.map(|v| !is_truthy(&v)).unwrap_or(true);
        let demo_mode = env.demo.map(|v| is_truthy(&v)).unwrap_or(false);

        let mut datasource = DataSourceConfig::from_file(file.datasource);
        if let Some(id) = env.datasource_id.and_then(|v| v.parse().ok()) {
            datasource.id = id;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            backend_url,
            request_timeout_secs,
            enable_tui,
            demo_mode,
            datasource,
            logging,
        }
    }
}
