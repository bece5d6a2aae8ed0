//! Configuration for reaching the remote service.

use std::env;
use std::time::Duration;
use url::Url;

/// Default service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout, enforced by the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpGateway`](crate::HttpGateway).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root; API paths are resolved against it
    pub base_url: Url,
    /// Basic auth user
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for the service at `base_url` with default credentials.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            username: "admin".to_string(),
            password: "123".to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("CLASSBOARD_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("CLASSBOARD_API_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| ConfigError::InvalidTimeout)?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let mut config = Self::new(&base_url)?.with_timeout(timeout);
        if let Ok(username) = env::var("CLASSBOARD_API_USERNAME") {
            config.username = username;
        }
        if let Ok(password) = env::var("CLASSBOARD_API_PASSWORD") {
            config.password = password;
        }

        Ok(config)
    }
}

/// Paths are joined onto the base, so it must end with a slash.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized).map_err(|_| ConfigError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid CLASSBOARD_API_TIMEOUT_SECS value")]
    InvalidTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ClientConfig::new("http://example.com/school").unwrap();
        assert_eq!(config.base_url.as_str(), "http://example.com/school/");
        assert_eq!(
            config.base_url.join("api/users").unwrap().as_str(),
            "http://example.com/school/api/users"
        );
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_credentials("principal", "secret")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.username, "principal");
        assert_eq!(config.password, "secret");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
