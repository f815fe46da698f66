use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error_handling::types::ConfigError;

/// Application configuration, read from a TOML file.
///
/// # Fields Overview
///
/// - `database_path`: SQLite file holding dashboard-session state and
///   minimal log entries. Submission content never goes there.
/// - `reap_interval_secs`: period of the session-expiry reaper.
/// - `dashboard_max_age_hours`: lifetime of a newly opened dashboard.
/// - `max_photos` / `max_photo_size_mb`: photo limits advertised on intake
///   links; enforced at the intake boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database_path: PathBuf,
    pub reap_interval_secs: u64,
    pub dashboard_max_age_hours: i64,
    pub max_photos: usize,
    pub max_photo_size_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("triagem.sqlite3"),
            reap_interval_secs: 300,
            dashboard_max_age_hours: 24,
            max_photos: 3,
            max_photo_size_mb: 3,
        }
    }
}

impl Config {
    /// Reads and validates a configuration file. Missing keys take their
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reap_interval_secs == 0 {
            return Err(ConfigError::NotInRange(
                "reap_interval_secs must be at least 1".to_string(),
            ));
        }
        if !(1..=168).contains(&self.dashboard_max_age_hours) {
            return Err(ConfigError::NotInRange(
                "dashboard_max_age_hours must be within 1..=168".to_string(),
            ));
        }
        if !(1..=10).contains(&self.max_photos) {
            return Err(ConfigError::NotInRange(
                "max_photos must be within 1..=10".to_string(),
            ));
        }
        if !(1..=10).contains(&self.max_photo_size_mb) {
            return Err(ConfigError::NotInRange(
                "max_photo_size_mb must be within 1..=10".to_string(),
            ));
        }
        Ok(())
    }

    /// Expiry timestamp for a dashboard opened now.
    pub fn make_expires_at(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::hours(self.dashboard_max_age_hours)
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_with_all_keys() {
        let file = write_config(
            r#"
database_path = "/tmp/plantao.sqlite3"
reap_interval_secs = 60
dashboard_max_age_hours = 12
max_photos = 5
max_photo_size_mb = 2
"#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/plantao.sqlite3"));
        assert_eq!(config.reap_interval_secs, 60);
        assert_eq!(config.dashboard_max_age_hours, 12);
        assert_eq!(config.max_photos, 5);
        assert_eq!(config.max_photo_size_mb, 2);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let file = write_config("reap_interval_secs = 30\n");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.reap_interval_secs, 30);
        assert_eq!(config.dashboard_max_age_hours, 24);
        assert_eq!(config.max_photos, 3);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let file = write_config("reap_interval_secs = 0\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::NotInRange(_))
        ));

        let file = write_config("dashboard_max_age_hours = 0\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::NotInRange(_))
        ));

        let file = write_config("max_photos = 50\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::NotInRange(_))
        ));
    }

    #[test]
    fn test_parse_and_io_errors() {
        let file = write_config("reap_interval_secs = \"logo\"\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::TomlError(_))
        ));

        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/triagem.toml")),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_make_expires_at_matches_max_age() {
        let config = Config::default();
        let expires = config.make_expires_at();
        let delta = expires - Utc::now();
        assert!(delta <= chrono::Duration::hours(24));
        assert!(delta > chrono::Duration::hours(23));
    }
}
