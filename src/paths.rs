use std::path::PathBuf;

use crate::config;

/// Répertoire de configuration propre à la plateforme
/// Platform-specific configuration directory
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library/Application Support/picker")
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("picker")
    }
}

/// Preferences file, `PICKER_PREFERENCES` when set
pub fn preferences_file() -> PathBuf {
    match std::env::var_os(config::PREFERENCES_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_dir().join(config::PREFERENCES_FILE_NAME),
    }
}
