//! Tracing initialisation

use billed_core::{AppError, ErrorMetadata, LogLevel};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "billed=info,billed_web=info,billed_storage=info,billed_core=info";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter; `json` switches to JSON lines.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Log a command failure at the level its kind calls for
pub fn log_app_error(error: &AppError) {
    let error_code = error.error_code();
    let recoverable = error.is_recoverable();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, error_code, recoverable, "Command failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, error_code, recoverable, "Command failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, error_code, recoverable, "Command failed");
        }
    }
}
