use async_trait::async_trait;
use billed_core::constants::BILLS_COLLECTION;
use billed_core::models::{Bill, BillStatus, CreateBillRequest, CreatedBill};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::keys::generate_receipt_key;
use crate::traits::{require_id, BillsGateway, GatewayError, GatewayResult};

/// Local filesystem gateway
///
/// Receipts are written under `base_path` using the shared key layout, and
/// records are kept in a JSON index (`bills.json`) next to them.
pub struct LocalBillsGateway {
    base_path: PathBuf,
    base_url: String,
    // Serializes read-modify-write cycles on the index file
    index_lock: Mutex<()>,
}

impl LocalBillsGateway {
    /// Create a new LocalBillsGateway instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for receipts and the index (e.g., "/var/lib/billed")
    /// * `base_url` - Base URL receipts are served from (e.g., "http://localhost:5678/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> GatewayResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            GatewayError::Transport(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBillsGateway {
            base_path,
            base_url,
            index_lock: Mutex::new(()),
        })
    }

    /// Convert storage key to filesystem path, refusing keys that could
    /// escape the base directory
    fn key_to_path(&self, storage_key: &str) -> GatewayResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(GatewayError::InvalidPayload(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    fn index_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", BILLS_COLLECTION))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> GatewayResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;
        }
        Ok(())
    }

    async fn read_index(&self) -> GatewayResult<Vec<Bill>> {
        let path = self.index_path();
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let raw = fs::read(&path).await.map_err(|e| {
            GatewayError::Transport(format!("Failed to read index {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            GatewayError::Transport(format!("Corrupt index {}: {}", path.display(), e))
        })
    }

    async fn write_index(&self, bills: &[Bill]) -> GatewayResult<()> {
        let path = self.index_path();
        let raw = serde_json::to_vec_pretty(bills)
            .map_err(|e| GatewayError::InvalidPayload(e.to_string()))?;

        // Replace the index atomically via a sibling temp file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).await.map_err(|e| {
            GatewayError::Transport(format!("Failed to write index {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            GatewayError::Transport(format!("Failed to replace index {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    async fn store_receipt(&self, key: &str, data: &[u8]) -> GatewayResult<String> {
        let path = self.key_to_path(key)?;
        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            GatewayError::Transport(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            GatewayError::Transport(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            GatewayError::Transport(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local receipt upload successful"
        );

        Ok(self.generate_url(key))
    }
}

#[async_trait]
impl BillsGateway for LocalBillsGateway {
    async fn list(&self) -> GatewayResult<Vec<Bill>> {
        let _guard = self.index_lock.lock().await;
        self.read_index().await
    }

    async fn create(&self, request: CreateBillRequest) -> GatewayResult<CreatedBill> {
        let id = Uuid::new_v4().to_string();
        let email = request.email().to_string();
        let bill = match request {
            CreateBillRequest::Receipt { email, file } => {
                let key = generate_receipt_key(&email, &file.name);
                let url = self.store_receipt(&key, &file.data).await?;
                Bill {
                    id: Some(id.clone()),
                    email,
                    expense_type: String::new(),
                    name: String::new(),
                    amount: None,
                    date: String::new(),
                    vat: String::new(),
                    pct: 0,
                    commentary: String::new(),
                    file_url: Some(url),
                    file_name: Some(file.name),
                    status: BillStatus::Pending,
                }
            }
            CreateBillRequest::Record(mut bill) => {
                bill.id = Some(id.clone());
                bill
            }
        };

        let _guard = self.index_lock.lock().await;
        let mut bills = self.read_index().await?;
        let created = CreatedBill {
            id: id.clone(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        };
        bills.push(bill);
        self.write_index(&bills).await?;

        tracing::info!(bill_id = %id, email = %email, "Local gateway created bill");
        Ok(created)
    }

    async fn update(&self, bill: &Bill) -> GatewayResult<Bill> {
        let id = require_id(bill)?;

        let _guard = self.index_lock.lock().await;
        let mut bills = self.read_index().await?;
        let slot = bills
            .iter_mut()
            .find(|b| b.id.as_deref() == Some(id))
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        *slot = bill.clone();
        self.write_index(&bills).await?;

        tracing::info!(bill_id = %id, "Local gateway updated bill");
        Ok(bill.clone())
    }
}
