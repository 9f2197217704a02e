use std::fmt;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::settings::Settings;

const SETTINGS_DIR: &str = ".sqldesk";
const SETTINGS_FILE: &str = "settings.json";

pub const ENV_PORT: &str = "SQLDESK_PORT";
pub const ENV_COMPLETION_ENDPOINT: &str = "SQLDESK_COMPLETION_ENDPOINT";
pub const ENV_MODEL: &str = "SQLDESK_MODEL";

#[derive(Debug)]
pub enum SettingsError {
    NoCacheDir,
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidEnv { var: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoCacheDir => write!(f, "cannot determine settings directory"),
            SettingsError::Io(e) => write!(f, "settings io error: {}", e),
            SettingsError::Parse(e) => write!(f, "settings parse error: {}", e),
            SettingsError::InvalidEnv { var, value } => {
                write!(f, "invalid value for {}: {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        SettingsError::Io(value)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        SettingsError::Parse(value)
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join("sqldesk").join("logs"))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Cannot determine log directory")
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Writes default settings to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoCacheDir)?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Settings file (created with defaults if missing) plus environment
/// overrides. A broken file falls back to defaults.
pub fn load_settings() -> Settings {
    let from_file = ensure_settings_file().and_then(|path| load_settings_from(&path));
    let mut settings = match from_file {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "using default settings");
            Settings::default()
        }
    };
    if let Err(e) = apply_env_overrides(&mut settings, |var| std::env::var(var).ok()) {
        tracing::warn!(error = %e, "ignoring environment override");
    }
    settings
}

/// Applies `SQLDESK_*` overrides read through `lookup`.
pub fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(endpoint) = lookup(ENV_COMPLETION_ENDPOINT).filter(|v| !v.trim().is_empty()) {
        settings.assistant.endpoint = endpoint;
    }
    if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
        settings.assistant.model = model;
    }
    if let Some(port) = lookup(ENV_PORT) {
        settings.server.port = port.trim().parse().map_err(|_| SettingsError::InvalidEnv {
            var: ENV_PORT,
            value: port.clone(),
        })?;
    }
    Ok(())
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
