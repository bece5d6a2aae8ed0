//! Configuration management for the server.

use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Basic auth user accepted on `/api` routes
    pub auth_username: String,
    /// Basic auth password accepted on `/api` routes
    pub auth_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: PathBuf::from("uploads"),
            auth_username: "admin".to_string(),
            auth_password: "123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => defaults.port,
        };

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let auth_username = env::var("AUTH_USERNAME").unwrap_or(defaults.auth_username);
        let auth_password = env::var("AUTH_PASSWORD").unwrap_or(defaults.auth_password);
        if auth_username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        Ok(Self {
            host,
            port,
            upload_dir,
            auth_username,
            auth_password,
        })
    }

    /// Address to bind, as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("AUTH_USERNAME must not be empty")]
    EmptyUsername,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.auth_username, "admin");
        assert_eq!(config.auth_password, "123");
    }
}
