//! Billed Web Library
//!
//! Employee-facing pages of Billed rendered into an in-memory [`Document`]:
//! the bills list and the new-bill form, wired to a [`BillsGateway`] and
//! navigated through symbolic [`Route`]s.
//!
//! Host capabilities (navigation, user alerts, the console error channel)
//! are traits so the pages can run under a CLI, a test harness or a real
//! browser shell.
//!
//! [`BillsGateway`]: billed_storage::BillsGateway

pub mod containers;
pub mod document;
pub mod error_sink;
pub mod html;
pub mod notify;
pub mod router;
pub mod telemetry;
pub mod views;

pub use containers::{
    BillsContainer, ContainerContext, FormPhase, NewBillController, NewBillForm,
};
pub use document::Document;
pub use error_sink::{ErrorSink, TracingErrorSink};
pub use notify::{Notifier, TracingNotifier};
pub use router::{Navigator, Route, Router};
