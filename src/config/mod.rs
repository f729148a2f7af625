mod settings;

pub use settings::{Config, InputSettings, OutputSettings};

use crate::error::{Result, TopupError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "topup.toml";

/// Get the config directory path (~/.topup/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "topup") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.topup/
    let home = dirs_home().ok_or_else(|| {
        TopupError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".topup"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load topup.toml (defaults if missing)
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| TopupError::ConfigParse { path, source: e })
}

/// Write the config template, refusing to overwrite an existing file
pub fn init_config(config_dir: &Path) -> Result<PathBuf> {
    let path = config_dir.join(CONFIG_FILE);
    if path.exists() {
        return Err(TopupError::AlreadyInitialized(path));
    }
    fs::create_dir_all(config_dir)?;
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}

/// Template content for topup.toml
pub const CONFIG_TEMPLATE: &str = r#"[input]
companies = "companies.json"
users = "users.json"

[output]
path = "output.txt"
format = "text"   # or "json"
"#;
