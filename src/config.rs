//! Client settings loaded from YAML
//!
//! Settings describe how to reach a collection API: where it lives, how to
//! authenticate and which headers to send. They convert into an
//! [`HttpClientConfig`].
//!
//! ```yaml
//! base_url: https://www.virustotal.com/api/v3
//! api_key: "..."
//! timeout_seconds: 60
//! headers:
//!   x-tool: my-script
//! ```

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// Client Settings
// ============================================================================

/// Settings for the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL collection paths are joined onto
    pub base_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers for every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl ClientSettings {
    /// Create settings for a base URL with defaults for everything else
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }

    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    /// Build the HTTP client configuration
    pub fn into_http_config(self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds));

        if let Some(key) = self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

/// Load settings from a YAML file
pub fn load_settings(path: impl AsRef<Path>) -> Result<ClientSettings> {
    let path = path.as_ref();
    debug!("Loading settings from {}", path.display());
    let content = fs::read_to_string(path)?;
    ClientSettings::from_yaml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r#"
base_url: https://api.example.com/v3
api_key: secret
headers:
  x-tool: tests
"#;
        let settings = ClientSettings::from_yaml_str(yaml).unwrap();

        assert_eq!(settings.base_url, "https://api.example.com/v3");
        assert_eq!(settings.api_key, Some("secret".to_string()));
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(settings.headers.get("x-tool"), Some(&"tests".to_string()));
    }

    #[test]
    fn test_settings_into_http_config() {
        let mut settings = ClientSettings::new("https://api.example.com");
        settings.api_key = Some("secret".to_string());
        settings.timeout_seconds = 5;
        settings.user_agent = Some("agent/1".to_string());

        let config = settings.into_http_config();
        assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "agent/1");
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            ClientSettings::from_yaml_str("base_url: not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientSettings::from_yaml_str("base_url: ftp://example.com"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ClientSettings::from_yaml_str("base_url: https://example.com\ntimeout_seconds: 0"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ClientSettings::from_yaml_str("api_key: x"),
            Err(Error::YamlParse(_))
        ));
    }

    #[test]
    fn test_load_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:8080").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080");

        let err = load_settings("/nonexistent/settings.yaml").unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
