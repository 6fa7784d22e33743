//! Template engine for the public validation pages and the contact relay
//! email bodies, using Jinja2 syntax.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const VALIDATE_HTML: &str = include_str!("../../templates/validate.html");
const VALIDATE_NOT_FOUND_HTML: &str = include_str!("../../templates/validate_not_found.html");
const CONTACT_EMAIL_TXT: &str = include_str!("../../templates/contact_email.txt");
const CONTACT_EMAIL_HTML: &str = include_str!("../../templates/contact_email.html");

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    // The templates are embedded and fixed; a parse failure here is a
    // programming error, not a runtime condition.
    env.add_template("validate.html", VALIDATE_HTML)
        .expect("validate.html failed to parse");
    env.add_template("validate_not_found.html", VALIDATE_NOT_FOUND_HTML)
        .expect("validate_not_found.html failed to parse");
    env.add_template("contact_email.txt", CONTACT_EMAIL_TXT)
        .expect("contact_email.txt failed to parse");
    env.add_template("contact_email.html", CONTACT_EMAIL_HTML)
        .expect("contact_email.html failed to parse");

    env
}

/// Render a named template with the given context.
///
/// `.html` templates are HTML-escaped by the engine's default auto-escape
/// rules; the plain-text email template is not.
pub fn render_template(name: &str, ctx: Value) -> Result<String, TemplateError> {
    let env = TEMPLATE_ENV.get_or_init(init_environment);

    let template = env
        .get_template(name)
        .map_err(|_| TemplateError::NotFound(name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_validate_page() {
        let html = render_template(
            "validate.html",
            context! {
                doc_type => "contratos",
                external_id => "C-001",
                description => "Contrato de prestação",
                created_at => "2026-08-07 12:00 UTC",
                qr_image_url => "/img/qrcodes/abc.png",
            },
        )
        .unwrap();

        assert!(html.contains("contratos"));
        assert!(html.contains("C-001"));
        assert!(html.contains("Contrato de prestação"));
        assert!(html.contains("/img/qrcodes/abc.png"));
    }

    #[test]
    fn test_html_templates_escape_markup() {
        let html = render_template(
            "validate.html",
            context! {
                doc_type => "contratos",
                external_id => "<script>alert(1)</script>",
                description => "x",
                created_at => "x",
                qr_image_url => "x",
            },
        )
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template() {
        let err = render_template("missing.html", context! {}).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}
