use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Novita image-to-video endpoint.
pub const DEFAULT_VENDOR_URL: &str = "https://api.novita.ai/v1/img2video";

/// Upper bound on a single vendor call.
pub const VENDOR_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct Img2VideoConfig {
    pub common: core_config::Config,
    pub vendor: VendorConfig,
}

#[derive(Debug, Clone)]
pub struct VendorConfig {
    /// Bearer credential. `None` is tolerated at startup and rejected per request.
    pub api_key: Option<Secret<String>>,
    pub endpoint: String,
    pub timeout: Duration,
}

impl VendorConfig {
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(Secret::new),
            endpoint: endpoint.into(),
            timeout: VENDOR_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            env::var("NOVITA_API_KEY").ok(),
            env::var("NOVITA_API_URL")
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_VENDOR_URL.to_string()),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }
}

impl Img2VideoConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Img2VideoConfig {
            common,
            vendor: VendorConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_unconfigured() {
        let config = VendorConfig::new(Some(String::new()), DEFAULT_VENDOR_URL);
        assert!(config.api_key.is_none());
        assert!(!config.is_configured());

        let config = VendorConfig::new(None, DEFAULT_VENDOR_URL);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_configured_key() {
        let config = VendorConfig::new(Some("sk-test".to_string()), DEFAULT_VENDOR_URL);
        assert!(config.is_configured());
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.endpoint, DEFAULT_VENDOR_URL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = VendorConfig::new(Some("sk-very-secret".to_string()), DEFAULT_VENDOR_URL);
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
