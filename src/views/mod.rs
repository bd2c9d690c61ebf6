//! Server-rendered HTML.
//!
//! Each view function returns a [`Page`]; the dispatcher wraps it in the
//! shared layout. Every piece of user-controlled text goes through
//! [`escape`].

pub mod account;
pub mod layout;
pub mod status;

pub use layout::layout;

/// A rendered page body plus its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub content: String,
}

impl Page {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// HTML-escape `&`, `<`, `>`, `"` and `'`.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<ul class="error_list">` for validation messages, empty when there are none.
pub(crate) fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul class=\"error_list\">{}</ul>\n", items)
}

pub(crate) fn hidden_token(token: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\" />",
        crate::security::csrf::TOKEN_FIELD,
        escape(token)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_error_list() {
        assert_eq!(error_list(&[]), "");
        let html = error_list(&["<bad>".to_string()]);
        assert!(html.contains("<li>&lt;bad&gt;</li>"));
    }
}
