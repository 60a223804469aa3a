pub fn render() -> String {
    r#"<div id="loading" data-testid="loading">Loading...</div>"#.to_string()
}
