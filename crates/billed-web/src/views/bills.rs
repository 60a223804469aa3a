//! Bills list page

use billed_core::models::{sort_by_date_desc, Bill, BillStatus};

use crate::html::escape;
use crate::router::Route;
use crate::views::layout;

/// Display label of a status, as employees read it
pub fn status_label(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

/// Render the bills page, newest bill first
pub fn render(bills: &[Bill]) -> String {
    let mut sorted = bills.to_vec();
    sort_by_date_desc(&mut sorted);

    let rows: String = sorted.iter().map(row).collect();
    let content = format!(
        concat!(
            r#"<div class="content-header">"#,
            r#"<div class="content-title">Mes notes de frais</div>"#,
            r#"<button type="button" data-testid="btn-new-bill" class="btn btn-primary">Nouvelle note de frais</button>"#,
            r#"</div>"#,
            r#"<div id="data-table">"#,
            r#"<table id="example" class="table table-striped">"#,
            r#"<thead><tr><th>Type</th><th>Nom</th><th>Date</th><th>Montant</th><th>Statut</th><th>Actions</th></tr></thead>"#,
            r#"<tbody data-testid="tbody">{}</tbody>"#,
            r#"</table>"#,
            r#"</div>"#
        ),
        rows
    );

    layout::render(Route::Bills, &content)
}

fn row(bill: &Bill) -> String {
    let amount = bill
        .amount
        .map(|a| format!("{} €", a))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<tr data-testid="bill-row">"#,
            r#"<td>{expense_type}</td>"#,
            r#"<td data-testid="bill-name">{name}</td>"#,
            r#"<td data-testid="bill-date">{date}</td>"#,
            r#"<td>{amount}</td>"#,
            r#"<td data-testid="bill-status">{status}</td>"#,
            r#"<td><div class="icon-actions">"#,
            r#"<div id="eye" data-testid="icon-eye" data-bill-url="{url}">Voir</div>"#,
            r#"</div></td>"#,
            r#"</tr>"#
        ),
        expense_type = escape(&bill.expense_type),
        name = escape(&bill.name),
        date = escape(&bill.date),
        amount = escape(&amount),
        status = status_label(bill.status),
        url = escape(bill.file_url.as_deref().unwrap_or_default()),
    )
}

/// Receipt overlay opened from a row's eye icon
pub fn receipt_modal(file_url: &str) -> String {
    format!(
        concat!(
            r#"<div class="modal fade show" id="modaleFile" data-testid="modaleFile" tabindex="-1" role="dialog">"#,
            r#"<div class="modal-dialog modal-dialog-centered modal-lg" role="document">"#,
            r#"<div class="modal-content">"#,
            r#"<div class="modal-header"><h5 class="modal-title">Justificatif</h5></div>"#,
            r#"<div class="modal-body">"#,
            r#"<img width="100%" src="{}" alt="Bill" data-testid="receipt-image">"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#
        ),
        escape(file_url)
    )
}
