/// Application constants used throughout the application

/// The display name of the application (with proper casing)
pub const APP_NAME: &str = "TileSlide";

/// The lowercase version for file names and directories
pub const APP_NAME_LOWERCASE: &str = "tileslide";

/// Version of the application (should match Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that overrides the config file path
pub const CONFIG_PATH_ENV: &str = "TILESLIDE_CONFIG";
