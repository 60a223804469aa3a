use billed_core::models::Bill;
use billed_storage::GatewayResult;

use crate::containers::ContainerContext;
use crate::router::Route;
use crate::views;

/// Bills list page
pub struct BillsContainer {
    ctx: ContainerContext,
}

impl BillsContainer {
    pub fn new(ctx: ContainerContext) -> Self {
        Self { ctx }
    }

    /// Fetch the bills to display
    pub async fn get_bills(&self) -> GatewayResult<Vec<Bill>> {
        let bills = self.ctx.gateway.list().await?;
        tracing::debug!(
            email = %self.ctx.session.email,
            count = bills.len(),
            "Loaded bills"
        );
        Ok(bills)
    }

    /// Render the outcome of [`get_bills`](Self::get_bills).
    ///
    /// A failed fetch shows the error page with the gateway's message as is.
    pub fn render(&self, result: GatewayResult<Vec<Bill>>) {
        match result {
            Ok(bills) => self.ctx.document.set_body(views::bills::render(&bills)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load bills");
                self.ctx
                    .document
                    .set_body(views::error::render(&e.message()));
            }
        }
    }

    pub async fn load(&self) {
        let result = self.get_bills().await;
        self.render(result);
    }

    pub fn handle_click_new_bill(&self) {
        self.ctx.navigator.navigate(Route::NewBill);
    }

    /// Open the receipt overlay for the row whose eye icon carries `file_url`
    pub fn handle_click_icon_eye(&self, file_url: &str) {
        self.ctx
            .document
            .show_modal(views::bills::receipt_modal(file_url));
    }
}
