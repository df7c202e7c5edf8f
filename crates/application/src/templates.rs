//! Mail templates for the contact relay
//!
//! Templates are embedded at compile time and rendered with Tera. Output of
//! `.html` templates is autoescaped; `.txt` templates are rendered as is.

use std::collections::HashMap;

use domain::ContactMessage;
use tera::{Context, Tera, Value};
use thiserror::Error;

use crate::error::ApplicationError;

/// Template name of the HTML contact mail
pub const CONTACT_HTML: &str = "contact/message.html";
/// Template name of the plain-text contact mail
pub const CONTACT_TEXT: &str = "contact/message.txt";

mod embedded {
    pub const CONTACT_HTML: &str = r"<h2>Nytt meddelande från kontaktformuläret</h2>
<p><strong>Från:</strong> {{ name }}</p>
<p><strong>E-post:</strong> {{ email }}</p>
<p><strong>Meddelande:</strong></p>
<p>{{ message | escape | linebreaksbr | safe }}</p>
";

    pub const CONTACT_TEXT: &str = r"Nytt meddelande från kontaktformuläret

Från: {{ name }}
E-post: {{ email }}

Meddelande:
{{ message }}
";
}

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template failed to compile
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Template failed to render
    #[error("Template rendering failed: {0}")]
    Render(String),
}

impl From<TemplateError> for ApplicationError {
    fn from(err: TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Rendered bodies of a contact mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    /// HTML body
    pub html: String,
    /// Plain-text body
    pub text: String,
}

/// Compiled contact mail templates
#[derive(Debug, Clone)]
pub struct MailTemplates {
    tera: Tera,
}

impl MailTemplates {
    /// Compile the embedded templates
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Compile` if an embedded template is invalid.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.register_filter("linebreaksbr", linebreaksbr_filter);

        tera.add_raw_templates(vec![
            (CONTACT_HTML, embedded::CONTACT_HTML),
            (CONTACT_TEXT, embedded::CONTACT_TEXT),
        ])
        .map_err(|e| TemplateError::Compile(e.to_string()))?;

        Ok(Self { tera })
    }

    /// Render both bodies of the mail relaying `contact`
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Render` if a template cannot be rendered.
    pub fn render_contact(&self, contact: &ContactMessage) -> Result<RenderedMail, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("name", &contact.name);
        ctx.insert("email", contact.email.as_str());
        ctx.insert("message", &contact.message);

        Ok(RenderedMail {
            html: self.render(CONTACT_HTML, &ctx)?,
            text: self.render(CONTACT_TEXT, &ctx)?,
        })
    }

    fn render(&self, name: &str, ctx: &Context) -> Result<String, TemplateError> {
        self.tera
            .render(name, ctx)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }
}

/// Convert newlines to `<br>` tags
fn linebreaksbr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("linebreaksbr requires a string"))?;
    Ok(Value::String(s.replace("\r\n", "\n").replace('\n', "<br>\n")))
}
