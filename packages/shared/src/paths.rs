//! XDG path helpers.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Application identifier for XDG directories
const APP_NAME: &str = "tuganire";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory
///
/// Location: `$XDG_CONFIG_HOME/tuganire` or `~/.config/tuganire`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(fallback_config_dir)
}

/// Get the preferences file (the client's counterpart of browser `localStorage`)
///
/// Location: `$XDG_CONFIG_HOME/tuganire/preferences.json`
pub fn preferences_file() -> PathBuf {
    config_dir().join("preferences.json")
}

fn fallback_config_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join(APP_NAME)
}
