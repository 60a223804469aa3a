//! Symbolic routes and the session-gated router

use billed_core::models::Session;
use billed_core::FileValidator;
use billed_storage::{BillsGateway, SessionStore};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

use crate::containers::{BillsContainer, ContainerContext, NewBillController};
use crate::error_sink::{ErrorSink, TracingErrorSink};
use crate::notify::{Notifier, TracingNotifier};
use crate::{views, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.path())
    }
}

/// Capability to move the user to another page
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

struct Location {
    route: Route,
    // Bumped on every navigation so a late bills fetch cannot overwrite a newer page
    generation: u64,
}

struct RouterInner {
    document: Document,
    sessions: SessionStore,
    gateway: Arc<dyn BillsGateway>,
    notifier: Arc<dyn Notifier>,
    error_sink: Arc<dyn ErrorSink>,
    validator: FileValidator,
    location: Mutex<Location>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Renders routes into the document
///
/// Cheap to clone; clones drive the same document.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

pub struct RouterBuilder {
    document: Document,
    sessions: SessionStore,
    gateway: Arc<dyn BillsGateway>,
    notifier: Arc<dyn Notifier>,
    error_sink: Arc<dyn ErrorSink>,
    validator: FileValidator,
}

impl RouterBuilder {
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn error_sink(mut self, error_sink: Arc<dyn ErrorSink>) -> Self {
        self.error_sink = error_sink;
        self
    }

    pub fn validator(mut self, validator: FileValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> Router {
        Router {
            inner: Arc::new(RouterInner {
                document: self.document,
                sessions: self.sessions,
                gateway: self.gateway,
                notifier: self.notifier,
                error_sink: self.error_sink,
                validator: self.validator,
                location: Mutex::new(Location {
                    route: Route::Login,
                    generation: 0,
                }),
                pending: Mutex::new(None),
            }),
        }
    }
}

impl Router {
    pub fn builder(
        document: Document,
        sessions: SessionStore,
        gateway: Arc<dyn BillsGateway>,
    ) -> RouterBuilder {
        RouterBuilder {
            document,
            sessions,
            gateway,
            notifier: Arc::new(TracingNotifier),
            error_sink: Arc::new(TracingErrorSink),
            validator: FileValidator::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// Route currently displayed
    pub fn location(&self) -> Route {
        self.inner
            .location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .route
    }

    /// Signed-in user; an unreadable record counts as signed out
    pub fn session(&self) -> Option<Session> {
        match self.inner.sessions.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session record");
                None
            }
        }
    }

    fn context(&self) -> Option<ContainerContext> {
        let session = self.session()?;
        Some(ContainerContext {
            document: self.inner.document.clone(),
            session,
            gateway: self.inner.gateway.clone(),
            navigator: Arc::new(self.clone()),
            notifier: self.inner.notifier.clone(),
            error_sink: self.inner.error_sink.clone(),
        })
    }

    /// Bills page controller for the signed-in user
    pub fn bills_container(&self) -> Option<BillsContainer> {
        self.context().map(BillsContainer::new)
    }

    /// Fresh new bill form controller for the signed-in user
    pub fn new_bill_controller(&self) -> Option<NewBillController> {
        self.context()
            .map(|ctx| NewBillController::new(ctx, self.inner.validator.clone()))
    }

    /// Wait for the background render started by the last navigation
    pub async fn settle(&self) {
        let pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Bills render task failed");
            }
        }
    }

    fn render_bills(&self, generation: u64) {
        let Some(container) = self.bills_container() else {
            return;
        };
        let inner = self.inner.clone();

        let handle = tokio::spawn(async move {
            let result = container.get_bills().await;
            let location = inner.location.lock().unwrap_or_else(PoisonError::into_inner);
            if location.generation == generation {
                container.render(result);
            } else {
                tracing::debug!("Discarding bills fetched for a page that was left");
            }
        });

        *self.inner.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }
}

impl Navigator for Router {
    fn navigate(&self, requested: Route) {
        let route = if requested.requires_session() && self.session().is_none() {
            tracing::debug!(requested = %requested, "No session, showing login");
            Route::Login
        } else {
            requested
        };

        let generation = {
            let mut location = self.inner.location.lock().unwrap_or_else(PoisonError::into_inner);
            location.route = route;
            location.generation += 1;
            location.generation
        };
        tracing::debug!(route = %route, "Navigating");

        let document = &self.inner.document;
        match route {
            Route::Login => document.set_body(views::login::render()),
            Route::NewBill => document.set_body(views::new_bill::render()),
            Route::Bills => {
                document.set_body(views::loading::render());
                self.render_bills(generation);
            }
        }
    }
}
