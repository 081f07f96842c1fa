//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the root data folder
pub const ROOT_FOLDER_ENV: &str = "DAYLS_ROOT_FOLDER";

/// Database file name under the root folder
const DATABASE_FILE: &str = "dayls.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        debug!("Root folder from command line: {}", path);
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        debug!("Root folder from {}: {}", ROOT_FOLDER_ENV, path);
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    debug!("Root folder from {}: {}", config_path.display(), root_folder);
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Ensure the root folder exists, creating it if needed
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database file under the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/dayls/config.toml first, then /etc/dayls/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("dayls").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/dayls/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("dayls").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/dayls (or /var/lib/dayls for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("dayls"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/dayls"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("dayls"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/dayls"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("dayls"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\dayls"))
    } else {
        PathBuf::from("./dayls_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins() {
        let root = resolve_root_folder(Some("/tmp/dayls-cli-test")).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/dayls-cli-test"));
    }

    #[test]
    fn test_database_path() {
        assert_eq!(
            database_path(Path::new("/tmp/dayls")),
            PathBuf::from("/tmp/dayls/dayls.db")
        );
    }

    #[test]
    fn test_default_root_folder_nonempty() {
        assert!(!default_root_folder().as_os_str().is_empty());
    }
}
