//! Boss configuration loading from TOML files
//!
//! The engine only consumes parsed [`TrackerConfig`] snapshots; reading
//! and parsing the file lives out here with the rest of the host-side
//! plumbing.

use std::fs;
use std::path::{Path, PathBuf};

use bosstally_core::TrackerConfig;
use thiserror::Error;

/// Errors while reading the boss configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load and index a tracker configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config: TrackerConfig =
        toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    config.build_index();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use std::io::Write;

    #[test]
    fn loads_and_indexes_a_config_file() {
        let dir = std::env::temp_dir().join("bosstally-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bosses.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[bosses.dragon]\nvictory_message = \"{{boss_name}} down\"\n"
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.is_tracked("DRAGON"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_config(std::path::Path::new("/nonexistent/bosses.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bosses.toml"));
    }
}
