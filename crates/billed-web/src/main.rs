//! Billed CLI: drive the employee pages from a terminal.
//!
//! Configuration comes from the environment (see `billed_core::Config`).
//! Set SESSION_STORE_PATH so `login` outlives the command.

use anyhow::Context;
use billed_core::models::{SelectedFile, Session, UserType};
use billed_core::{AppError, Config, FileValidator};
use billed_storage::{create_gateway, create_key_value_store, SessionStore};
use billed_web::telemetry::{init_tracing, log_app_error};
use billed_web::{Document, Navigator, NewBillForm, Notifier, Route, Router};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "billed", about = "Billed expense reports CLI")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session for the given user
    Login {
        email: String,
        /// Role of the user (employee or admin)
        #[arg(long, default_value = "employee")]
        role: UserType,
    },
    /// Remove the stored session
    Logout,
    /// Print the bills page
    Bills,
    /// Submit a new bill with its receipt, then print the bills page
    NewBill {
        /// Receipt image
        file: PathBuf,
        /// Declared content type; guessed from the extension when omitted
        #[arg(long)]
        content_type: Option<String>,
        /// Expense type
        #[arg(long = "type", default_value = "Transports")]
        expense_type: String,
        #[arg(long, default_value = "")]
        name: String,
        /// Expense date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        vat: String,
        #[arg(long, default_value = "20")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
    },
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn content_type_from_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".to_string()),
        "png" => Some("image/png".to_string()),
        "gif" => Some("image/gif".to_string()),
        "pdf" => Some("application/pdf".to_string()),
        _ => None,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.json_logs);
            return fail(&e);
        }
    };
    init_tracing(cli.json_logs || config.is_production());

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &AppError) -> ExitCode {
    use billed_core::ErrorMetadata;

    log_app_error(err);
    eprintln!("{}", err.client_message());
    ExitCode::FAILURE
}

fn not_signed_in() -> AppError {
    AppError::Session("Not signed in, run `billed login <email>` first".to_string())
}

async fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    if config.session_store_path.is_none() {
        tracing::warn!("SESSION_STORE_PATH not set, the session only lasts for this command");
    }
    let sessions = SessionStore::new(create_key_value_store(config));

    match command {
        Commands::Login { email, role } => {
            let session = Session {
                user_type: role,
                email,
                status: "connected".to_string(),
            };
            sessions.login(&session)?;
            println!("Signed in as {} ({})", session.email, session.user_type);
        }
        Commands::Logout => {
            sessions.logout()?;
            println!("Signed out");
        }
        Commands::Bills => {
            let router = build_router(config, sessions).await?;
            if router.session().is_none() {
                return Err(not_signed_in());
            }
            router.navigate(Route::Bills);
            router.settle().await;
            println!("{}", router.document().inner_html());
        }
        Commands::NewBill {
            file,
            content_type,
            expense_type,
            name,
            date,
            amount,
            vat,
            pct,
            commentary,
        } => {
            let router = build_router(config, sessions).await?;
            router.navigate(Route::NewBill);
            let controller = router.new_bill_controller().ok_or_else(not_signed_in)?;

            let data = tokio::fs::read(&file)
                .await
                .map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read {}: {}", file.display(), e))
                })?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let selected = match content_type.or_else(|| content_type_from_extension(&file)) {
                Some(ct) => SelectedFile::new(file_name, ct, data),
                None => SelectedFile::untyped(file_name, data),
            };

            if let Some(upload) = controller.on_file_change(vec![selected])? {
                upload.await.context("Receipt upload task failed")?;
            }

            let form = NewBillForm {
                expense_type,
                expense_name: name,
                datepicker: date
                    .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
                amount,
                vat,
                pct,
                commentary,
            };

            if let Some(write) = controller.on_submit(form) {
                write.await.context("Bill submission task failed")?;
            }

            // The page opened on submit may predate the write; show the settled list.
            router.navigate(Route::Bills);
            router.settle().await;
            println!("{}", router.document().inner_html());
        }
    }

    Ok(())
}

async fn build_router(config: &Config, sessions: SessionStore) -> Result<Router, AppError> {
    let gateway = create_gateway(config).await?;

    Ok(Router::builder(Document::new(), sessions, gateway)
        .notifier(Arc::new(StderrNotifier))
        .validator(FileValidator::new(
            config.accepted_receipt_content_types.clone(),
        ))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_core::ErrorMetadata;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            content_type_from_extension(Path::new("scan.JPG")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            content_type_from_extension(Path::new("scan.pdf")).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(content_type_from_extension(Path::new("scan")), None);
    }

    #[test]
    fn test_role_argument() {
        let cli = Cli::try_parse_from(["billed", "login", "a@b.tld", "--role", "admin"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Login { role: UserType::Admin, .. }
        ));
        assert!(Cli::try_parse_from(["billed", "login", "a@b.tld", "--role", "guest"]).is_err());
    }

    #[tokio::test]
    async fn test_bills_without_session_is_a_session_error() {
        let config = Config::default();
        let err = run(Commands::Bills, &config).await.unwrap_err();
        assert_eq!(err.error_code(), "SESSION_ERROR");
        assert_eq!(err.client_message(), "Please sign in again");
    }

    #[tokio::test]
    async fn test_unreadable_receipt_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let kv = dir.path().join("session.json");
        let config = Config {
            session_store_path: Some(kv.to_string_lossy().into_owned()),
            ..Config::default()
        };
        run(
            Commands::Login {
                email: "employee@test.tld".to_string(),
                role: UserType::Employee,
            },
            &config,
        )
        .await
        .unwrap();

        let err = run(
            Commands::NewBill {
                file: dir.path().join("missing.png"),
                content_type: None,
                expense_type: "Transports".to_string(),
                name: String::new(),
                date: None,
                amount: "10".to_string(),
                vat: String::new(),
                pct: "20".to_string(),
                commentary: String::new(),
            },
            &config,
        )
        .await
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.client_message().contains("missing.png"));
    }
}
