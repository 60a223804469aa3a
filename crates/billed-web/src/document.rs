//! In-memory document
//!
//! Holds the HTML of the page body plus an optional modal overlay. Views
//! produce strings, containers push them here, and tests query the result by
//! `data-testid`.

use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Default)]
struct DocumentState {
    body: String,
    modal: Option<String>,
}

/// Rendered page shared between the router, the containers and the host
///
/// Clones share the same content.
#[derive(Clone, Default)]
pub struct Document {
    state: Arc<Mutex<DocumentState>>,
}

/// Snapshot of one element found by its `data-testid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    text: String,
}

impl Element {
    fn capture(element: scraper::ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            attributes: value
                .attrs()
                .map(|(name, v)| (name.to_string(), v.to_string()))
                .collect(),
            classes: value.classes().map(String::from).collect(),
            text: element.text().collect::<String>().trim().to_string(),
        }
    }

    /// Text of the element and all its descendants, trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the page body; any open modal is dismissed
    pub fn set_body(&self, html: impl Into<String>) {
        let mut state = self.state();
        state.body = html.into();
        state.modal = None;
    }

    pub fn show_modal(&self, html: impl Into<String>) {
        self.state().modal = Some(html.into());
    }

    pub fn inner_html(&self) -> String {
        let state = self.state();
        match &state.modal {
            Some(modal) => format!("{}{}", state.body, modal),
            None => state.body.clone(),
        }
    }

    /// Whether `text` appears in the page, markup excluded
    pub fn contains_text(&self, text: &str) -> bool {
        let fragment = Html::parse_fragment(&self.inner_html());
        fragment
            .root_element()
            .text()
            .collect::<String>()
            .contains(text)
    }

    pub fn find_all_by_test_id(&self, test_id: &str) -> Vec<Element> {
        let selector = match Selector::parse(&format!("[data-testid=\"{}\"]", test_id)) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::debug!(test_id = %test_id, error = ?e, "Invalid test id selector");
                return Vec::new();
            }
        };

        let fragment = Html::parse_fragment(&self.inner_html());
        fragment.select(&selector).map(Element::capture).collect()
    }

    pub fn find_by_test_id(&self, test_id: &str) -> Option<Element> {
        self.find_all_by_test_id(test_id).into_iter().next()
    }

    /// Texts of every element carrying `test_id`, in document order
    pub fn texts_by_test_id(&self, test_id: &str) -> Vec<String> {
        self.find_all_by_test_id(test_id)
            .into_iter()
            .map(|e| e.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_test_id() {
        let document = Document::new();
        document.set_body(
            r#"<ul><li data-testid="date" class="a b">2022-06-15</li><li data-testid="date">2021-01-01</li></ul>"#,
        );

        assert_eq!(
            document.texts_by_test_id("date"),
            vec!["2022-06-15", "2021-01-01"]
        );
        let first = document.find_by_test_id("date").unwrap();
        assert!(first.has_class("b"));
        assert!(!first.has_class("c"));
        assert!(document.find_by_test_id("dat").is_none());
    }

    #[test]
    fn test_text_includes_nested_elements() {
        let document = Document::new();
        document.set_body(
            r#"<table><tr><td data-testid="date"><span>2022-06-15</span></td></tr></table>"#,
        );
        assert_eq!(document.texts_by_test_id("date"), vec!["2022-06-15"]);

        document.set_body(r#"<div data-testid="row">Billet <b>avion</b> &amp; taxi</div>"#);
        assert_eq!(
            document.find_by_test_id("row").unwrap().text(),
            "Billet avion & taxi"
        );
    }

    #[test]
    fn test_attributes_are_decoded() {
        let document = Document::new();
        document.set_body(r#"<div data-testid="eye" data-bill-url="https://x.tld/a?b=1&amp;c=2"></div>"#);
        assert_eq!(
            document
                .find_by_test_id("eye")
                .unwrap()
                .attribute("data-bill-url")
                .as_deref(),
            Some("https://x.tld/a?b=1&c=2")
        );
    }

    #[test]
    fn test_modal_is_dismissed_by_new_body() {
        let document = Document::new();
        document.set_body("<p>page</p>");
        document.show_modal(r#"<div data-testid="modal">receipt</div>"#);
        assert!(document.contains_text("receipt"));

        document.set_body("<p>other</p>");
        assert!(!document.contains_text("receipt"));
        assert!(document.contains_text("other"));
    }

    #[test]
    fn test_contains_text_ignores_markup() {
        let document = Document::new();
        document.set_body(r#"<div class="Erreur">Erreur &amp; 404</div>"#);
        assert!(document.contains_text("Erreur & 404"));
        assert!(!document.contains_text("class"));
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let document = Document::new();
        document.set_body("<p>before</p>");

        let poisoner = document.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("render failed while holding the page");
        })
        .join();
        assert!(document.state.is_poisoned());

        document.set_body("<p>after</p>");
        assert!(document.contains_text("after"));
    }
}
