//! Configuration module
//!
//! Application settings live in a TOML file, by default at
//! `~/.config/escape-core/config.toml`. Every section has defaults, so a
//! missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AdminRole;
use crate::infrastructure::database::{DatabaseConfig, DEFAULT_DATABASE_URL};
use crate::shared::types::DomainError;
use crate::shared::validations::{
    validate_name, validate_password, validate_phone_number, MAX_LOGIN_ID_LENGTH,
};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "ESCAPE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root of the TOML config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Full connection URL; wins over `path` when set
    pub url: Option<String>,
    /// SQLite file used when no URL is given
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            max_connections: 5,
        }
    }
}

impl DatabaseSettings {
    /// Resolve the connection URL: `DATABASE_URL`, then `url`, then `path`.
    pub fn connection_url(&self) -> String {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return url;
        }
        self.url_without_env()
    }

    fn url_without_env(&self) -> String {
        match (&self.url, &self.path) {
            (Some(url), _) => url.clone(),
            (None, Some(path)) => format!("sqlite://{}?mode=rwc", path.display()),
            (None, None) => DEFAULT_DATABASE_URL.to_string(),
        }
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. "info" or "escape_core=debug"
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Admin account seeded into an empty database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub login_id: String,
    pub password: String,
    pub name: String,
    pub phone_number: Option<String>,
    /// Stored role name, e.g. "SUPER_ADMIN"
    pub role: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            login_id: "admin".to_string(),
            password: "admin1234".to_string(),
            name: "Administrator".to_string(),
            phone_number: None,
            role: AdminRole::SuperAdmin.as_str().to_string(),
        }
    }
}

impl AdminSettings {
    pub fn role(&self) -> Result<AdminRole, ConfigError> {
        AdminRole::parse(&self.role)
            .ok_or_else(|| ConfigError::Invalid(format!("admin.role: unknown role '{}'", self.role)))
    }
}

impl AppConfig {
    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write config as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "logging.format: expected 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        }

        let admin = &self.admin;
        let invalid = |e: DomainError| {
            ConfigError::Invalid(format!("admin: {}", e.reason()))
        };
        if admin.login_id.trim().is_empty() || admin.login_id.chars().count() > MAX_LOGIN_ID_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "admin.login_id must be 1 to {} characters",
                MAX_LOGIN_ID_LENGTH
            )));
        }
        validate_password(&admin.password).map_err(invalid)?;
        validate_name(&admin.name).map_err(invalid)?;
        if let Some(phone_number) = &admin.phone_number {
            validate_phone_number(phone_number).map_err(invalid)?;
        }
        admin.role()?;
        Ok(())
    }
}

/// Default config location: `ESCAPE_CONFIG`, else the user config directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("escape-core")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.admin.role().unwrap(), AdminRole::SuperAdmin);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.database.path = Some(PathBuf::from("/var/lib/escape/escape.db"));
        config.logging.format = "json".to_string();
        config.admin.phone_number = Some("010-1234-5678".to_string());
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[admin]
login_id = "owner"
role = "OFFICE_MANAGER"
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.admin.login_id, "owner");
        assert_eq!(config.admin.role().unwrap(), AdminRole::OfficeManager);
        assert_eq!(config.admin.password, AdminSettings::default().password);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database\nurl = ").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.admin.role = "JANITOR".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.admin.password = "short".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.admin.phone_number = Some("011-1234-5678".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn url_resolution_prefers_url_over_path() {
        let mut settings = DatabaseSettings::default();
        assert_eq!(settings.url_without_env(), DEFAULT_DATABASE_URL);

        settings.path = Some(PathBuf::from("data/escape.db"));
        assert_eq!(settings.url_without_env(), "sqlite://data/escape.db?mode=rwc");

        settings.url = Some("sqlite::memory:".to_string());
        assert_eq!(settings.url_without_env(), "sqlite::memory:");
    }
}
