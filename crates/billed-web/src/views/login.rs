/// Sign-in page rendered for every route while nobody is signed in
pub fn render() -> String {
    concat!(
        r#"<div class="login-page" data-testid="login-page">"#,
        r#"<h2>Employé</h2>"#,
        r#"<form data-testid="form-employee">"#,
        r#"<label for="employee-email">Votre email</label>"#,
        r#"<input type="email" id="employee-email" data-testid="employee-email-input" required>"#,
        r#"<label for="employee-password">Mot de passe</label>"#,
        r#"<input type="password" id="employee-password" data-testid="employee-password-input" required>"#,
        r#"<button type="submit" data-testid="employee-login-button">Se connecter</button>"#,
        r#"</form>"#,
        r#"</div>"#
    )
    .to_string()
}
