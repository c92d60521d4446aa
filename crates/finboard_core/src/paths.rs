use std::path::{Path, PathBuf};

/// Finboard data directory (~/.finboard)
pub fn finboard_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".finboard")
}

/// Path of the persisted session record
pub fn session_json_path() -> PathBuf {
    finboard_dir().join("session.json")
}

/// Make sure the finboard directory exists
pub fn ensure_finboard_dir() -> std::io::Result<PathBuf> {
    let dir = finboard_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON document from disk
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Save a JSON document to disk, creating parent directories as needed
pub fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {e}"))?;
    }
    let content =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize: {e}"))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
