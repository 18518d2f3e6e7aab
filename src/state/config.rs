use crate::state::game::NewTileParams;
use crate::state::paths;
use crate::utils::constants::APP_VERSION;
use crate::utils::data;
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    // Metadata
    pub version: String,
    pub last_updated: DateTime<Utc>,
    // Logging
    pub debug_logging: bool,
    // New tile settings
    pub tile_choices: [u32; 2], // [two, four]
    pub tile_weights: [u8; 2], // relative odds of each choice
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(&paths::data::config_json())
    }

    /// Load config from `config_path`, falling back to (and saving) defaults if it is
    /// missing or invalid
    ///
    /// A config written by another version is stamped with this version and saved back.
    pub fn load_from(config_path: &Path) -> Self {
        match data::load_json_from_file::<AppConfig>(config_path) {
            Ok(mut config) => {
                if config.version != APP_VERSION {
                    crate::debug_print!("🔄 Upgrading config from {} to {}", config.version, APP_VERSION);
                    config.version = APP_VERSION.to_string();
                    config.last_updated = Utc::now();
                    if let Err(e) = config.save_to(config_path) {
                        crate::debug_eprint!("⚠️ Could not save upgraded config: {}", e);
                    }
                }
                config
            }
            Err(e) => {
                crate::debug_eprint!("⚠️ Failed to load config file: {}. Using defaults.", e);
                let default_config = Self::default();
                if let Err(e) = default_config.save_to(config_path) {
                    crate::debug_eprint!("⚠️ Could not write default config: {}", e);
                }
                default_config
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), String> {
        data::save_json_to_file(self, config_path)
    }

    /// Tile parameters for a new game; invalid values fall back to the defaults
    pub fn new_tile_params(&self) -> NewTileParams {
        NewTileParams::new(self.tile_choices, self.tile_weights).unwrap_or_else(|e| {
            crate::always_eprint!("❌ Invalid tile settings in config: {}", e);
            NewTileParams::default()
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let params = NewTileParams::default();
        Self {
            version: APP_VERSION.to_string(),
            last_updated: Utc::now(),
            debug_logging: true,
            tile_choices: params.tile_choices,
            tile_weights: params.tile_weights,
        }
    }
}
