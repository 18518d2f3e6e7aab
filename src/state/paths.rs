/// Centralized path definitions
///
/// - `config.json` lives in the system app data directory
///   (e.g. ~/.local/share/tileslide on Linux, %APPDATA%/tileslide on Windows)
/// - `TILESLIDE_CONFIG` overrides the config file location
use crate::utils::constants::{ APP_NAME_LOWERCASE, CONFIG_PATH_ENV };
use std::path::PathBuf;

/// Get the system app data directory for tileslide
///
/// Falls back to `./data` when the platform reports no home directory.
fn get_system_app_data_dir() -> PathBuf {
    use directories::BaseDirs;

    match BaseDirs::new() {
        Some(base_dirs) => base_dirs.data_dir().join(APP_NAME_LOWERCASE),
        None => PathBuf::from("data"),
    }
}

/// Application data directory paths
pub mod data {
    use super::*;

    /// Application configuration file
    pub fn config_json() -> PathBuf {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => get_system_app_data_dir().join("config.json"),
        }
    }
}
