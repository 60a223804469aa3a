//! User alerts

/// Blocking alert shown to the user (the browser's `alert`)
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that only logs; used where no interactive surface exists
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(message = %message, "User alert");
    }
}
