use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Get the app config dir, creating it if it does not exist yet
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow!("failed to find os config dir."))?;
    path.push("ytlinks");

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }
    Ok(path)
}
