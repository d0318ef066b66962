//! # Backend location
//!
//! The only setting the data layer needs is the backend's base URL.
//!
//! - **Native** builds call [`ApiConfig::load`], which reads `.env` (via `dotenvy`),
//!   then layers a built-in default, an optional `portal.toml`, and the
//!   `PORTAL_API_BASE_URL` environment variable using the `config` crate.
//! - **WASM** builds have no process environment, so the value is taken from
//!   `PORTAL_API_BASE_URL` at compile time.
//!
//! ```toml
//! # portal.toml
//! base_url = "https://school.example/api"
//! ```

use serde::Deserialize;

use crate::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    /// Create a config, dropping any trailing slash from the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ApiError> {
        use config::{Config, Environment, File, FileFormat};

        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(
                File::with_name("portal.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("PORTAL_API"))
            .build()?;

        let loaded: ApiConfig = config.try_deserialize()?;
        if loaded.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is empty".to_string()));
        }
        Ok(Self::new(loaded.base_url))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ApiError> {
        let base_url = option_env!("PORTAL_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL);
        if base_url.trim().is_empty() {
            return Err(ApiError::Config("PORTAL_API_BASE_URL is empty".to_string()));
        }
        Ok(Self::new(base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig::new("https://school.example/api/");
        assert_eq!(config.base_url, "https://school.example/api");
        assert_eq!(config.url("student/login"), "https://school.example/api/student/login");
        assert_eq!(config.url("/parent/children"), "https://school.example/api/parent/children");
    }

    #[test]
    fn test_load_reads_environment() {
        std::env::set_var("PORTAL_API_BASE_URL", "https://portal.test/v1/");
        let config = ApiConfig::load().unwrap();
        std::env::remove_var("PORTAL_API_BASE_URL");
        assert_eq!(config.base_url, "https://portal.test/v1");
    }
}
