//! Application Configuration

use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "HANMADI_DATA_DIR";

/// Driver configuration options
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is unset
    pub default_log_filter: String,

    /// Start scanning as soon as the board opens
    pub scan_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("hanmadi-data"),
            default_log_filter: "info".to_string(),
            scan_on_start: true,
        }
    }
}

impl AppConfig {
    /// Defaults, then the environment, then command line arguments
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        for arg in args {
            match arg.as_str() {
                "--no-scan" => config.scan_on_start = false,
                _ => config.data_dir = PathBuf::from(arg),
            }
        }
        config
    }
}
