pub mod schema;

pub use schema::{PollConfig, SpeedoConfig};

use speedo_core::{Result, SpeedoError};
use std::path::{Path, PathBuf};

/// Read a `speedo.toml`.  A missing file is not an error: a bare install
/// should still bring up a working gauge, so built-in defaults apply.
/// Unreadable or malformed files are fatal and name the offending path.
pub fn load(path: impl AsRef<Path>) -> Result<SpeedoConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!("no config at '{}', starting with defaults", path.display());
        return Ok(SpeedoConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| SpeedoError::Config(format!("cannot read '{}': {e}", path.display())))?;
    let config =
        toml::from_str(&raw).map_err(|e| SpeedoError::Config(format!("'{}': {e}", path.display())))?;
    Ok(config)
}

/// `$XDG_CONFIG_HOME/speedo/speedo.toml`, falling back to
/// `~/.config/speedo/speedo.toml`.
pub fn default_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        }
    };
    base.join("speedo").join("speedo.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/speedo.toml").unwrap();
        assert_eq!(config.poll.resolution, 5);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let path = std::env::temp_dir().join("speedo-malformed-config.toml");
        std::fs::write(&path, "gauge = \"not a table\"").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("speedo-malformed-config.toml"));
        std::fs::remove_file(&path).ok();
    }
}
