use crate::error::{ConfigError, Result};
use crate::source::ConfigSource;

/// Keys the orchestrator refuses to run without
pub const REQUIRED_KEYS: &[&str] = &["DB_HOST", "DB_USER", "DB_NAME"];

/// Connection settings for the MySQL-compatible database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            name: "excel_data_manager".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`,
    /// using the defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `DB_PORT` is not a port number.
    pub fn from_source(source: &ConfigSource) -> Result<Self> {
        let defaults = Self::default();

        let port = match source.get("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "DB_PORT".to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: source.get_or("DB_HOST", &defaults.host),
            port,
            user: source.get_or("DB_USER", &defaults.user),
            password: source.get_or("DB_PASSWORD", &defaults.password),
            name: source.get_or("DB_NAME", &defaults.name),
        })
    }

    /// Password rendered for display: one `*` per character, or `(empty)`.
    pub fn masked_password(&self) -> String {
        if self.password.is_empty() {
            "(empty)".to_string()
        } else {
            "*".repeat(self.password.chars().count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(dotenv: &str) -> ConfigSource {
        ConfigSource::from_parts(Vec::<(String, String)>::new(), Some(dotenv))
    }

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::from_source(&source("")).unwrap();
        assert_eq!(config, DatabaseConfig::default());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert_eq!(config.name, "excel_data_manager");
    }

    #[test]
    fn test_overrides() {
        let config = DatabaseConfig::from_source(&source(
            "DB_HOST=db.internal\nDB_PORT=3307\nDB_USER=loader\nDB_PASSWORD=secret\nDB_NAME=sheets\n",
        ))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.user, "loader");
        assert_eq!(config.password, "secret");
        assert_eq!(config.name, "sheets");
    }

    #[test]
    fn test_invalid_port() {
        let result = DatabaseConfig::from_source(&source("DB_PORT=mysql\n"));
        assert!(matches!(result, Err(ConfigError::Invalid { ref key, .. }) if key == "DB_PORT"));

        let result = DatabaseConfig::from_source(&source("DB_PORT=70000\n"));
        assert!(result.is_err());
    }

    #[test]
    fn test_masked_password() {
        let mut config = DatabaseConfig::default();
        assert_eq!(config.masked_password(), "(empty)");

        config.password = "hunter2".to_string();
        assert_eq!(config.masked_password(), "*******");
    }
}
