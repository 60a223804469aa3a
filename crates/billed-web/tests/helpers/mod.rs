//! Test helpers: recording collaborators and a page harness for the
//! container tests.
//!
//! Run from workspace root: `cargo test -p billed-web`.
#![allow(dead_code)]

pub mod fixtures;

use billed_core::models::Session;
use billed_core::FileValidator;
use billed_storage::{GatewayError, MemoryBillsGateway, MemoryKeyValueStore, SessionStore};
use billed_web::{
    views, BillsContainer, ContainerContext, Document, ErrorSink, Navigator, NewBillController,
    Notifier, Route, Router,
};
use std::sync::{Arc, Mutex};

pub const EMPLOYEE_EMAIL: &str = "employee@test.tld";

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingErrorSink {
    reports: Mutex<Vec<(String, GatewayError)>>,
}

impl RecordingErrorSink {
    pub fn reports(&self) -> Vec<(String, GatewayError)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingErrorSink {
    fn report(&self, operation: &str, error: &GatewayError) {
        self.reports
            .lock()
            .unwrap()
            .push((operation.to_string(), error.clone()));
    }
}

/// One page with recording collaborators around a memory gateway
pub struct TestPage {
    pub document: Document,
    pub gateway: MemoryBillsGateway,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub error_sink: Arc<RecordingErrorSink>,
}

impl TestPage {
    pub fn new(gateway: MemoryBillsGateway) -> Self {
        Self {
            document: Document::new(),
            gateway,
            navigator: Arc::new(RecordingNavigator::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            error_sink: Arc::new(RecordingErrorSink::default()),
        }
    }

    pub fn context(&self) -> ContainerContext {
        ContainerContext {
            document: self.document.clone(),
            session: Session::employee(EMPLOYEE_EMAIL),
            gateway: Arc::new(self.gateway.clone()),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
            error_sink: self.error_sink.clone(),
        }
    }

    /// Render the new bill form and attach its controller
    pub fn new_bill(&self) -> NewBillController {
        self.document.set_body(views::new_bill::render());
        NewBillController::new(self.context(), FileValidator::default())
    }

    pub fn bills(&self) -> BillsContainer {
        BillsContainer::new(self.context())
    }
}

/// Router over a memory gateway with an employee already signed in
pub struct TestApp {
    pub router: Router,
    pub gateway: MemoryBillsGateway,
    pub sessions: SessionStore,
    pub kv: MemoryKeyValueStore,
    pub error_sink: Arc<RecordingErrorSink>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn signed_in(gateway: MemoryBillsGateway) -> Self {
        let app = Self::signed_out(gateway);
        app.sessions
            .login(&Session::employee(EMPLOYEE_EMAIL))
            .unwrap();
        app
    }

    pub fn signed_out(gateway: MemoryBillsGateway) -> Self {
        let kv = MemoryKeyValueStore::new();
        let sessions = SessionStore::new(Arc::new(kv.clone()));
        let error_sink = Arc::new(RecordingErrorSink::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let router = Router::builder(Document::new(), sessions.clone(), Arc::new(gateway.clone()))
            .notifier(notifier.clone())
            .error_sink(error_sink.clone())
            .build();

        Self {
            router,
            gateway,
            sessions,
            kv,
            error_sink,
            notifier,
        }
    }

    pub fn document(&self) -> &Document {
        self.router.document()
    }
}
