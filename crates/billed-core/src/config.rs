//! Configuration module
//!
//! Settings are read from the environment (and a `.env` file when present).

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::DEFAULT_RECEIPT_CONTENT_TYPES;
use crate::error::AppError;

const HTTP_TIMEOUT_SECS: u64 = 30;

/// Which gateway implementation backs the bills collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBackend {
    Memory,
    Local,
    Http,
}

impl FromStr for GatewayBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(GatewayBackend::Memory),
            "local" => Ok(GatewayBackend::Local),
            "http" => Ok(GatewayBackend::Http),
            _ => Err(anyhow::anyhow!("Invalid gateway backend: {}", s)),
        }
    }
}

impl Display for GatewayBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GatewayBackend::Memory => write!(f, "memory"),
            GatewayBackend::Local => write!(f, "local"),
            GatewayBackend::Http => write!(f, "http"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub gateway_backend: GatewayBackend,
    // Remote API
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    // Local gateway
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Session persistence; in-memory when unset
    pub session_store_path: Option<String>,
    pub accepted_receipt_content_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            gateway_backend: GatewayBackend::Memory,
            api_url: None,
            api_token: None,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            local_storage_path: None,
            local_storage_base_url: None,
            session_store_path: None,
            accepted_receipt_content_types: DEFAULT_RECEIPT_CONTENT_TYPES
                .iter()
                .map(|ct| ct.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("BILLED_ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let gateway_backend = match env::var("BILLED_GATEWAY") {
            Ok(value) => value
                .parse()
                .map_err(|e: anyhow::Error| AppError::Config(e.to_string()))?,
            Err(_) => defaults.gateway_backend,
        };

        // Content types are matched exactly, so they are not lowercased here.
        let accepted_receipt_content_types = env::var("ACCEPTED_RECEIPT_CONTENT_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|ct| ct.trim().to_string())
                    .filter(|ct| !ct.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.accepted_receipt_content_types);

        let config = Config {
            environment,
            gateway_backend,
            api_url: env::var("BILLED_API_URL").ok(),
            api_token: env::var("BILLED_API_TOKEN").ok(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_TIMEOUT_SECS),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            session_store_path: env::var("SESSION_STORE_PATH").ok(),
            accepted_receipt_content_types,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.accepted_receipt_content_types.is_empty() {
            return Err(AppError::Config(
                "ACCEPTED_RECEIPT_CONTENT_TYPES must list at least one content type".to_string(),
            ));
        }

        match self.gateway_backend {
            GatewayBackend::Http if self.api_url.is_none() => Err(AppError::Config(
                "BILLED_API_URL must be set for the http gateway".to_string(),
            )),
            GatewayBackend::Local if self.local_storage_path.is_none() => Err(AppError::Config(
                "LOCAL_STORAGE_PATH must be set for the local gateway".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
