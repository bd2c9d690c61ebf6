//! Account pages: sign up, sign in, account overview.

use crate::models::User;
use crate::views::{error_list, escape, hidden_token, Page};

/// Values echoed back into a credentials form.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialsForm<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
    pub errors: &'a [String],
    pub token: &'a str,
}

fn credentials_form(action: &str, submit: &str, form: &CredentialsForm<'_>) -> String {
    format!(
        r#"<form action="{action}" method="post">
    {token}
    {errors}
    <table>
        <tr>
            <th>User name</th>
            <td><input type="text" name="user_name" value="{user_name}" /></td>
        </tr>
        <tr>
            <th>Password</th>
            <td><input type="password" name="password" value="{password}" /></td>
        </tr>
    </table>
    <p><input type="submit" value="{submit}" /></p>
</form>
"#,
        action = action,
        token = hidden_token(form.token),
        errors = error_list(form.errors),
        user_name = escape(form.user_name),
        password = escape(form.password),
        submit = submit,
    )
}

pub fn signup(form: &CredentialsForm<'_>) -> Page {
    let content = format!(
        "<h2>Sign up</h2>\n{}<p><a href=\"/account/signin\">Already registered? Sign in</a></p>\n",
        credentials_form("/account/register", "Sign up", form)
    );
    Page::new("Sign up", content)
}

pub fn signin(form: &CredentialsForm<'_>) -> Page {
    let content = format!(
        "<h2>Sign in</h2>\n{}<p><a href=\"/account/signup\">Create an account</a></p>\n",
        credentials_form("/account/authenticate", "Sign in", form)
    );
    Page::new("Sign in", content)
}

/// Account overview. `token` guards the sign-out form.
pub fn index(user: &User, followings: &[User], token: &str) -> Page {
    let list: String = followings
        .iter()
        .map(|f| {
            let name = escape(&f.user_name);
            format!("    <li><a href=\"/user/{name}\">{name}</a></li>\n", name = name)
        })
        .collect();

    let content = format!(
        r#"<h2>Account</h2>
<p>User name: <a href="/user/{name}"><strong>{name}</strong></a></p>
<ul>
    <li><a href="/">Home</a></li>
</ul>
<form action="/account/signout" method="post">
    {token}
    <input type="submit" value="Sign out" />
</form>
<h3>Following</h3>
<ul id="followings">
{list}</ul>
"#,
        name = escape(&user.user_name),
        list = list,
        token = hidden_token(token),
    );
    Page::new("Account", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_forms_post_to_matching_actions() {
        let form = CredentialsForm {
            token: "tok",
            ..Default::default()
        };
        assert!(signup(&form).content.contains("action=\"/account/register\""));
        assert!(signin(&form).content.contains("action=\"/account/authenticate\""));
    }

    #[test]
    fn test_form_echoes_input_escaped() {
        let errors = vec!["Enter a password.".to_string()];
        let form = CredentialsForm {
            user_name: "a\"b",
            password: "",
            errors: &errors,
            token: "tok",
        };
        let page = signup(&form);
        assert!(page.content.contains("value=\"a&quot;b\""));
        assert!(page.content.contains("Enter a password."));
    }

    #[test]
    fn test_index_lists_followings() {
        let user = |id, name: &str| User {
            id,
            user_name: name.into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let page = index(&user(1, "alice"), &[user(2, "bob")], "tok");
        assert!(page.content.contains("<a href=\"/user/bob\">bob</a>"));
        assert!(page.content.contains("action=\"/account/signout\""));
        assert!(page.content.contains("value=\"tok\""));
    }
}
