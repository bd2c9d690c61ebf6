//! Shared page layout.

use crate::views::{escape, Page};

/// Wrap `page` in the site chrome. Navigation depends on `authenticated`.
pub fn layout(page: &Page, authenticated: bool) -> String {
    let nav = if authenticated {
        "<a href=\"/\">Home</a>\n        <a href=\"/account\">Account</a>"
    } else {
        "<a href=\"/account/signin\">Sign in</a>\n        <a href=\"/account/signup\">Sign up</a>"
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>{title} - Mini Blog</title>
</head>
<body>
    <div id="header">
        <h1><a href="/">Mini Blog</a></h1>
    </div>
    <div id="nav">
        {nav}
    </div>
    <div id="main">
{content}
    </div>
</body>
</html>
"#,
        title = escape(&page.title),
        nav = nav,
        content = page.content,
    )
}

/// Standalone 404 document; `message` is escaped here.
pub fn not_found(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>404</title>
</head>
<body>
    {}
</body>
</html>
"#,
        escape(message)
    )
}
