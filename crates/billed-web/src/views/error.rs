use crate::html::escape;

/// Error page showing `message` as given
pub fn render(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="layout">"#,
            r#"<div class="content">"#,
            r#"<div class="content-header"><div class="content-title">Erreur</div></div>"#,
            r#"<div data-testid="error-message">{}</div>"#,
            r#"</div>"#,
            r#"</div>"#
        ),
        escape(message)
    )
}
