use serde::{ de::DeserializeOwned, Serialize };
/// Reading and writing the JSON config file
use std::fs;
use std::path::Path;

/// Read `config.json` (or any settings file) and parse it into `T`
///
/// The error names the file, so a broken config shows up in the log with its path.
pub fn load_json_from_file<T: DeserializeOwned>(file_path: &Path) -> Result<T, String> {
    let contents = fs
        ::read_to_string(file_path)
        .map_err(|e| format!("Cannot read settings '{}': {}", file_path.display(), e))?;

    serde_json
        ::from_str::<T>(&contents)
        .map_err(|e| format!("Settings '{}' are not valid JSON for this version: {}", file_path.display(), e))
}

/// Write settings as pretty JSON so the config stays hand-editable
///
/// The data directory is created on first save; a bare file name writes to the
/// working directory.
pub fn save_json_to_file<T: Serialize>(settings: &T, file_path: &Path) -> Result<(), String> {
    if let Some(dir) = file_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs
            ::create_dir_all(dir)
            .map_err(|e| format!("Cannot create settings directory '{}': {}", dir.display(), e))?;
    }

    let json = serde_json
        ::to_string_pretty(settings)
        .map_err(|e| format!("Cannot encode settings: {}", e))?;

    fs::write(file_path, json).map_err(|e|
        format!("Cannot write settings '{}': {}", file_path.display(), e)
    )
}
