//! New bill form controller
//!
//! Receipt selection is validated synchronously and uploaded in the
//! background. Submission fires the final write and leaves for the bills page
//! without waiting for it: a failed write is reported to the error sink and
//! nothing else happens.

use billed_core::constants::DEFAULT_VAT_PCT;
use billed_core::models::{parse_leading_int, Bill, BillStatus, CreateBillRequest, SelectedFile};
use billed_core::{FileValidationError, FileValidator};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

use crate::containers::ContainerContext;
use crate::router::Route;

/// Raw values of the new bill form, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub expense_name: String,
    /// `YYYY-MM-DD`
    pub datepicker: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Lifecycle of one form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    FileSelected,
    /// Final write in flight
    Submitting,
    /// Final write settled, successfully or not
    Done,
}

#[derive(Debug)]
struct FormState {
    phase: FormPhase,
    file_name: Option<String>,
    file_url: Option<String>,
    bill_id: Option<String>,
    // Bumped on every accepted selection; uploads of older ones are dropped
    selection: u64,
}

pub struct NewBillController {
    ctx: ContainerContext,
    validator: FileValidator,
    state: Arc<Mutex<FormState>>,
}

impl NewBillController {
    pub fn new(ctx: ContainerContext, validator: FileValidator) -> Self {
        Self {
            ctx,
            validator,
            state: Arc::new(Mutex::new(FormState {
                phase: FormPhase::Idle,
                file_name: None,
                file_url: None,
                bill_id: None,
                selection: 0,
            })),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).phase
    }

    /// Name of the last accepted receipt
    pub fn current_file_name(&self) -> Option<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).file_name.clone()
    }

    pub fn file_url(&self) -> Option<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).file_url.clone()
    }

    /// Identifier of the draft record created by the receipt upload
    pub fn bill_id(&self) -> Option<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).bill_id.clone()
    }

    /// Handle a change of the file input.
    ///
    /// Only the first file is considered. A rejected file triggers the user
    /// alert and leaves the form untouched. An accepted one becomes the
    /// current receipt immediately and is uploaded in the background; the
    /// returned handle lets callers observe that upload.
    pub fn on_file_change(
        &self,
        files: Vec<SelectedFile>,
    ) -> Result<Option<JoinHandle<()>>, FileValidationError> {
        let Some(file) = files.into_iter().next() else {
            return Ok(None);
        };

        if matches!(self.phase(), FormPhase::Submitting | FormPhase::Done) {
            tracing::debug!(file_name = %file.name, "Form already submitted, ignoring file");
            return Ok(None);
        }

        if let Err(e) = self.validator.validate(&file) {
            self.ctx.notifier.alert(&e.to_string());
            return Err(e);
        }

        let selection = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.selection += 1;
            state.file_name = Some(file.name.clone());
            // The previous draft belongs to the replaced receipt.
            state.file_url = None;
            state.bill_id = None;
            state.phase = FormPhase::FileSelected;
            state.selection
        };

        tracing::info!(
            file_name = %file.name,
            size_bytes = file.size(),
            "Receipt selected"
        );

        let gateway = self.ctx.gateway.clone();
        let error_sink = self.ctx.error_sink.clone();
        let state = self.state.clone();
        let request = CreateBillRequest::Receipt {
            email: self.ctx.session.email.clone(),
            file,
        };

        Ok(Some(tokio::spawn(async move {
            match gateway.create(request).await {
                Ok(created) => {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    if state.selection != selection {
                        tracing::debug!(
                            bill_id = %created.id,
                            "Dropping upload of a replaced receipt"
                        );
                        return;
                    }
                    tracing::info!(bill_id = %created.id, "Receipt uploaded");
                    state.bill_id = Some(created.id);
                    state.file_url = created.file_url;
                    if created.file_name.is_some() {
                        state.file_name = created.file_name;
                    }
                }
                Err(e) => error_sink.report("upload receipt", &e),
            }
        })))
    }

    /// Assemble the bill from `form` and the current receipt
    pub fn build_bill(&self, form: NewBillForm) -> Bill {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Bill {
            id: state.bill_id.clone(),
            email: self.ctx.session.email.clone(),
            expense_type: form.expense_type,
            name: form.expense_name,
            amount: parse_leading_int(&form.amount),
            date: form.datepicker,
            vat: form.vat,
            pct: parse_leading_int(&form.pct).unwrap_or(DEFAULT_VAT_PCT),
            commentary: form.commentary,
            file_url: state.file_url.clone(),
            file_name: state.file_name.clone(),
            status: BillStatus::Pending,
        }
    }

    /// Submit the form.
    ///
    /// The write is spawned and the bills page is requested right away,
    /// whatever the write's fate. The handle is only for observation; `None`
    /// means the form had already been submitted.
    pub fn on_submit(&self, form: NewBillForm) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if matches!(state.phase, FormPhase::Submitting | FormPhase::Done) {
                tracing::warn!("Ignoring repeated submission of the new bill form");
                return None;
            }
            state.phase = FormPhase::Submitting;
        }

        let bill = self.build_bill(form);
        tracing::info!(
            bill_id = ?bill.id,
            expense_type = %bill.expense_type,
            date = %bill.date,
            "Submitting bill"
        );

        let gateway = self.ctx.gateway.clone();
        let error_sink = self.ctx.error_sink.clone();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            let outcome = if bill.id.is_some() {
                gateway.update(&bill).await.map(|_| ())
            } else {
                gateway
                    .create(CreateBillRequest::Record(bill))
                    .await
                    .map(|_| ())
            };
            if let Err(e) = outcome {
                error_sink.report("submit bill", &e);
            }
            state.lock().unwrap_or_else(PoisonError::into_inner).phase = FormPhase::Done;
        });

        self.ctx.navigator.navigate(Route::Bills);
        Some(handle)
    }
}
