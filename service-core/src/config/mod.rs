use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Default request body ceiling. Inline base64 images routinely exceed axum's 2 MiB default.
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Listener settings shared by every service binary.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
