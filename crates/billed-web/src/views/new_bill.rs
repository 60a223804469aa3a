//! New bill form page

use crate::router::Route;
use crate::views::layout;

const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

pub fn render() -> String {
    let options: String = EXPENSE_TYPES
        .iter()
        .map(|t| format!("<option>{}</option>", crate::html::escape(t)))
        .collect();

    let content = format!(
        concat!(
            r#"<div class="content-header"><div class="content-title">Envoyer une note de frais</div></div>"#,
            r#"<form data-testid="form-new-bill">"#,
            r#"<label for="expense-type">Type de dépense</label>"#,
            r#"<select required data-testid="expense-type">{options}</select>"#,
            r#"<label for="expense-name">Nom de la dépense</label>"#,
            r#"<input type="text" data-testid="expense-name" placeholder="Vol Paris Londres">"#,
            r#"<label for="datepicker">Date</label>"#,
            r#"<input required type="date" data-testid="datepicker">"#,
            r#"<label for="amount">Montant TTC</label>"#,
            r#"<input required type="number" data-testid="amount" placeholder="348">"#,
            r#"<label for="vat">TVA</label>"#,
            r#"<input type="number" data-testid="vat" placeholder="70">"#,
            r#"<input required type="number" data-testid="pct" placeholder="20">"#,
            r#"<label for="commentary">Commentaire</label>"#,
            r#"<textarea data-testid="commentary" rows="3"></textarea>"#,
            r#"<label for="file">Justificatif</label>"#,
            r#"<input required type="file" accept="image/jpeg, image/jpg, image/png" data-testid="file">"#,
            r#"<button type="submit" id="btn-send-bill" data-testid="btn-send-bill" class="btn btn-primary">Envoyer</button>"#,
            r#"</form>"#
        ),
        options = options,
    );

    layout::render(Route::NewBill, &content)
}
