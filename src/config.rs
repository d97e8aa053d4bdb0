//! Client settings
//!
//! Settings are loaded from YAML and then overlaid with command-line or
//! environment values:
//!
//! ```yaml
//! base_url: https://gitlab.example.com/api/v4
//! timeout_secs: 15
//! per_page: 50
//! headers:
//!   PRIVATE-TOKEN: glpat-...
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Largest page size GitLab accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Settings for talking to a GitLab instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// API root, e.g. `https://gitlab.com/api/v4`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for listings (server default when unset)
    #[serde(default)]
    pub per_page: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            per_page: None,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl ClientSettings {
    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Check the settings for obviously wrong values
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        if let Some(per_page) = self.per_page {
            if per_page == 0 || per_page > MAX_PER_PAGE {
                return Err(Error::invalid_value(
                    "per_page",
                    format!("must be between 1 and {MAX_PER_PAGE}"),
                ));
            }
        }

        Ok(())
    }

    /// Build the HTTP client configuration
    pub fn client_config(&self) -> Result<HttpClientConfig> {
        self.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.trim_end_matches('/'))
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.per_page.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r"
base_url: https://gitlab.example.com/api/v4/
timeout_secs: 10
per_page: 50
headers:
  X-Custom: abc
";
        let settings = ClientSettings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.per_page, Some(50));
        assert_eq!(settings.headers.get("X-Custom"), Some(&"abc".to_string()));

        let config = settings.client_config().unwrap();
        assert_eq!(config.base_url, "https://gitlab.example.com/api/v4");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let settings = ClientSettings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_invalid_per_page() {
        let err = ClientSettings::default().with_per_page(101).validate().unwrap_err();
        assert!(err.to_string().contains("per_page"));

        let err = ClientSettings::default().with_per_page(0).validate().unwrap_err();
        assert!(err.to_string().contains("per_page"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientSettings::default()
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientSettings::from_yaml_str("timeout_secs: [oops").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://gl.example/api/v4").unwrap();
        writeln!(file, "per_page: 20").unwrap();

        let settings = ClientSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.base_url, "https://gl.example/api/v4");
        assert_eq!(settings.per_page, Some(20));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientSettings::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert!(err
            .to_string()
            .starts_with("Failed to read /definitely/not/here.yaml: IO error:"));
    }
}
