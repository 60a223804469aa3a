//! In-memory gateway
//!
//! Keeps bills in process memory. Used by tests and the demo CLI; failures
//! and slow writes can be injected per operation.

use async_trait::async_trait;
use billed_core::models::{Bill, BillStatus, CreateBillRequest, CreatedBill};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use uuid::Uuid;

use crate::keys::generate_receipt_key;
use crate::traits::{require_id, BillsGateway, GatewayError, GatewayResult};

const DEFAULT_BASE_URL: &str = "https://localhost:3456/images";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Gateway operation, used to target injected failures and call counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
}

/// In-memory `BillsGateway`
///
/// Clones share the same records, so a test can keep a handle while the
/// controller owns another.
#[derive(Clone)]
pub struct MemoryBillsGateway {
    bills: Arc<Mutex<Vec<Bill>>>,
    failures: Arc<Mutex<HashMap<Operation, GatewayError>>>,
    calls: Arc<Mutex<HashMap<Operation, usize>>>,
    // true while writes are held back
    write_gate: Arc<watch::Sender<bool>>,
    base_url: String,
}

impl Default for MemoryBillsGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBillsGateway {
    pub fn new() -> Self {
        let (write_gate, _) = watch::channel(false);
        Self {
            bills: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            write_gate: Arc::new(write_gate),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Gateway pre-filled with `bills`
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let gateway = Self::new();
        *lock(&gateway.bills) = bills;
        gateway
    }

    /// Make every future call to `operation` fail with `error`
    pub fn fail(&self, operation: Operation, error: GatewayError) {
        lock(&self.failures).insert(operation, error);
    }

    /// Remove an injected failure
    pub fn recover(&self, operation: Operation) {
        lock(&self.failures).remove(&operation);
    }

    /// Hold `create` and `update` calls until [`resume_writes`](Self::resume_writes)
    pub fn pause_writes(&self) {
        self.write_gate.send_replace(true);
    }

    pub fn resume_writes(&self) {
        self.write_gate.send_replace(false);
    }

    /// Number of times `operation` was invoked, failed calls included
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot of the stored records
    pub fn bills(&self) -> Vec<Bill> {
        lock(&self.bills).clone()
    }

    fn enter(&self, operation: Operation) -> GatewayResult<()> {
        *lock(&self.calls).entry(operation).or_insert(0) += 1;
        match lock(&self.failures).get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn wait_for_writes(&self) {
        let mut gate = self.write_gate.subscribe();
        // Sender lives in self, so the channel cannot close while we wait.
        let _ = gate.wait_for(|paused| !*paused).await;
    }
}

#[async_trait]
impl BillsGateway for MemoryBillsGateway {
    async fn list(&self) -> GatewayResult<Vec<Bill>> {
        self.enter(Operation::List)?;
        Ok(self.bills())
    }

    async fn create(&self, request: CreateBillRequest) -> GatewayResult<CreatedBill> {
        self.enter(Operation::Create)?;
        self.wait_for_writes().await;

        let id = Uuid::new_v4().to_string();
        let email = request.email().to_string();
        let bill = match request {
            CreateBillRequest::Receipt { email, file } => {
                let key = generate_receipt_key(&email, &file.name);
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
                    file_url: Some(format!("{}/{}", self.base_url.trim_end_matches('/'), key)),
                    file_name: Some(file.name),
                    status: BillStatus::Pending,
                }
            }
            CreateBillRequest::Record(mut bill) => {
                bill.id = Some(id.clone());
                bill
            }
        };

        let created = CreatedBill {
            id,
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        };
        lock(&self.bills).push(bill);

        tracing::debug!(bill_id = %created.id, email = %email, "Memory gateway created bill");
        Ok(created)
    }

    async fn update(&self, bill: &Bill) -> GatewayResult<Bill> {
        self.enter(Operation::Update)?;
        self.wait_for_writes().await;

        let id = require_id(bill)?;
        let mut bills = lock(&self.bills);
        let slot = bills
            .iter_mut()
            .find(|b| b.id.as_deref() == Some(id))
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        *slot = bill.clone();

        tracing::debug!(bill_id = %id, "Memory gateway updated bill");
        Ok(bill.clone())
    }
}
