//! Application configuration.
//!
//! Settings are read from a TOML file and can be overridden by environment
//! variables. Every field has a default so an empty file is a valid config.
//!
//! ```toml
//! [repository]
//! type = "seeded"
//! seed_file = "data/items.json"
//!
//! [timeline]
//! weeks_to_show = 4
//! lane_height_px = 40.0
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Repository selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// JSON file with the initial item set (for the `seeded` type).
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

/// Timeline rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default = "default_weeks_to_show")]
    pub weeks_to_show: u32,
    #[serde(default = "default_lane_height_px")]
    pub lane_height_px: f64,
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_weeks_to_show() -> u32 {
    4
}

fn default_lane_height_px() -> f64 {
    40.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            seed_file: None,
        }
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            weeks_to_show: default_weeks_to_show(),
            lane_height_px: default_lane_height_px(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `timeline.toml` in the current directory, then in
    /// `backend/`, then in the parent directory.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("timeline.toml"),
            PathBuf::from("backend/timeline.toml"),
            PathBuf::from("../timeline.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No timeline.toml found in standard locations",
        ))
    }

    /// Default-location config if present, built-in defaults otherwise.
    pub fn load_or_default() -> Result<Self, RepositoryError> {
        match Self::from_default_location() {
            Ok(config) => Ok(config),
            Err(RepositoryError::ConfigurationError { ref message, .. })
                if message.starts_with("No timeline.toml") =>
            {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`: server bind address
    /// - `TIMELINE_WEEKS`: number of weeks shown
    /// - `REPOSITORY_TYPE`: `local` | `seeded`
    /// - `SEED_FILE`: seed file for the seeded repository
    pub fn apply_env_overrides(mut self) -> Result<Self, RepositoryError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| RepositoryError::configuration("PORT must be a valid port number"))?;
        }
        if let Ok(weeks) = std::env::var("TIMELINE_WEEKS") {
            self.timeline.weeks_to_show = weeks.parse().map_err(|_| {
                RepositoryError::configuration("TIMELINE_WEEKS must be a positive integer")
            })?;
        }
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(seed) = std::env::var("SEED_FILE") {
            self.repository.seed_file = Some(PathBuf::from(seed));
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values the timeline cannot render with.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.timeline.weeks_to_show == 0 {
            return Err(RepositoryError::configuration(
                "timeline.weeks_to_show must be at least 1",
            ));
        }
        if !(self.timeline.lane_height_px.is_finite() && self.timeline.lane_height_px > 0.0) {
            return Err(RepositoryError::configuration(
                "timeline.lane_height_px must be a positive number",
            ));
        }
        self.repository_type()?;
        Ok(())
    }

    /// Parsed repository type.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        self.repository.repo_type.parse().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timeline.weeks_to_show, 4);
        assert_eq!(config.timeline.lane_height_px, 40.0);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.repository.repo_type, "local");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [repository]
            type = "seeded"
            seed_file = "items.json"

            [timeline]
            weeks_to_show = 6
            "#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Seeded);
        assert_eq!(config.repository.seed_file, Some(PathBuf::from("items.json")));
        assert_eq!(config.timeline.weeks_to_show, 6);
        assert_eq!(config.timeline.lane_height_px, 40.0);
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeline]\nweeks_to_show = 0").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("weeks_to_show"));
    }

    #[test]
    fn test_unknown_repository_type_rejected() {
        let mut config = AppConfig::default();
        config.repository.repo_type = "oracle".to_string();
        assert!(matches!(
            config.validate(),
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeline\nweeks_to_show = ").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
