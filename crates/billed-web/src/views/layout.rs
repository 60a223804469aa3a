use crate::router::Route;

/// Wrap page content in the employee layout with its vertical icon bar.
///
/// The icon matching `active` carries the `active-icon` class.
pub fn render(active: Route, content: &str) -> String {
    format!(
        concat!(
            r#"<div class="layout">"#,
            r#"<div class="vertical-navbar">"#,
            r#"<div class="layout-title">Billed</div>"#,
            r#"<div id="layout-icon1" data-testid="icon-window" class="{window}">Notes de frais</div>"#,
            r#"<div id="layout-icon2" data-testid="icon-mail" class="{mail}">Nouvelle note</div>"#,
            r#"<div id="layout-disconnect" data-testid="layout-disconnect">Se déconnecter</div>"#,
            r#"</div>"#,
            r#"<div class="content">{content}</div>"#,
            r#"</div>"#
        ),
        window = icon_class(active == Route::Bills),
        mail = icon_class(active == Route::NewBill),
        content = content,
    )
}

fn icon_class(active: bool) -> &'static str {
    if active {
        "layout-icon active-icon"
    } else {
        "layout-icon"
    }
}
