//! Page controllers
//!
//! A container owns the behaviour of one page: it talks to the gateway,
//! pushes rendered views into the document and asks the navigator to move
//! on. Everything it needs is passed in a [`ContainerContext`].

pub mod bills;
pub mod new_bill;

pub use bills::BillsContainer;
pub use new_bill::{FormPhase, NewBillController, NewBillForm};

use billed_core::models::Session;
use billed_storage::BillsGateway;
use std::sync::Arc;

use crate::{Document, ErrorSink, Navigator, Notifier};

/// Collaborators shared by the page containers
#[derive(Clone)]
pub struct ContainerContext {
    pub document: Document,
    /// Signed-in user, read once when the page was opened
    pub session: Session,
    pub gateway: Arc<dyn BillsGateway>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub error_sink: Arc<dyn ErrorSink>,
}
