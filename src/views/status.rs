//! Timeline, profile and single-status views.

use crate::models::{Status, User};
use crate::views::{error_list, escape, hidden_token, Page};

fn status_item(status: &Status) -> String {
    let name = escape(&status.user_name);
    format!(
        r#"<div class="status">
    <div class="status_content">
        <a href="/user/{name}">{name}</a>
        {body}
    </div>
    <div>
        <a href="/user/{name}/status/{id}">{created_at}</a>
    </div>
</div>
"#,
        name = name,
        body = escape(&status.body),
        id = status.id,
        created_at = status.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn status_list(statuses: &[Status]) -> String {
    let items: String = statuses.iter().map(status_item).collect();
    format!("<div id=\"statuses\">\n{}</div>\n", items)
}

/// Personal timeline with the post form.
pub fn index(user: &User, statuses: &[Status], body: &str, errors: &[String], token: &str) -> Page {
    let content = format!(
        r#"<h2>Home</h2>
<p>Signed in as {user_name}</p>
<form action="/status/post" method="post">
    {token}
    {errors}
    <textarea name="body" rows="2" cols="60">{body}</textarea>
    <p><input type="submit" value="Post" /></p>
</form>
{statuses}"#,
        user_name = escape(&user.user_name),
        token = hidden_token(token),
        errors = error_list(errors),
        body = escape(body),
        statuses = status_list(statuses),
    );
    Page::new("Home", content)
}

/// A user's public profile.
///
/// `following` is `None` when no follow control applies (anonymous viewer or
/// viewing oneself).
pub fn user(user: &User, statuses: &[Status], following: Option<bool>, token: &str) -> Page {
    let name = escape(&user.user_name);
    let follow = match following {
        Some(true) => "<p>Following</p>\n".to_string(),
        Some(false) => format!(
            r#"<form action="/account/follow" method="post">
    {token}
    <input type="hidden" name="following_name" value="{name}" />
    <input type="submit" value="Follow" />
</form>
"#,
            token = hidden_token(token),
            name = name,
        ),
        None => String::new(),
    };

    let content = format!("<h2>{}</h2>\n{}{}", name, follow, status_list(statuses));
    Page::new(user.user_name.clone(), content)
}

/// A single status.
pub fn show(status: &Status) -> Page {
    Page::new(status.user_name.clone(), status_item(status))
}
