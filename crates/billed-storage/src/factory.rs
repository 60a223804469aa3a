#[cfg(feature = "gateway-http")]
use crate::http::{Auth, HttpBillsGateway};
#[cfg(feature = "gateway-local")]
use crate::LocalBillsGateway;
use crate::{
    BillsGateway, FileKeyValueStore, GatewayBackend, GatewayError, GatewayResult, KeyValueStore,
    MemoryBillsGateway, MemoryKeyValueStore,
};
use billed_core::Config;
use std::sync::Arc;

const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:5678/files";

/// Create a bills gateway based on configuration
pub async fn create_gateway(config: &Config) -> GatewayResult<Arc<dyn BillsGateway>> {
    tracing::debug!(backend = %config.gateway_backend, "Creating bills gateway");

    match config.gateway_backend {
        GatewayBackend::Memory => Ok(Arc::new(MemoryBillsGateway::new())),

        #[cfg(feature = "gateway-http")]
        GatewayBackend::Http => {
            let base_url = config.api_url.clone().ok_or_else(|| {
                GatewayError::Transport("BILLED_API_URL not configured".to_string())
            })?;
            let auth = match &config.api_token {
                Some(token) => Auth::Bearer(token.clone()),
                None => Auth::Anonymous,
            };

            let gateway = HttpBillsGateway::new(
                base_url,
                auth,
                std::time::Duration::from_secs(config.http_timeout_secs),
            )
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
            Ok(Arc::new(gateway))
        }

        #[cfg(not(feature = "gateway-http"))]
        GatewayBackend::Http => Err(GatewayError::Transport(
            "HTTP gateway not available (gateway-http feature not enabled)".to_string(),
        )),

        #[cfg(feature = "gateway-local")]
        GatewayBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                GatewayError::Transport("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config
                .local_storage_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCAL_BASE_URL.to_string());

            let gateway = LocalBillsGateway::new(base_path, base_url).await?;
            Ok(Arc::new(gateway))
        }

        #[cfg(not(feature = "gateway-local"))]
        GatewayBackend::Local => Err(GatewayError::Transport(
            "Local gateway not available (gateway-local feature not enabled)".to_string(),
        )),
    }
}

/// Create the key-value store backing the session record
pub fn create_key_value_store(config: &Config) -> Arc<dyn KeyValueStore> {
    match &config.session_store_path {
        Some(path) => Arc::new(FileKeyValueStore::new(path)),
        None => Arc::new(MemoryKeyValueStore::new()),
    }
}
