//! Account actions: sign up, sign in, sign out, follow.

use crate::dispatch::{ActionContext, ActionError, ActionResult, Controller};
use crate::models::RepositoryError;
use crate::views;
use crate::views::account::CredentialsForm;

const SIGNUP_SCOPE: &str = "account/signup";
const SIGNIN_SCOPE: &str = "account/signin";
const FOLLOW_SCOPE: &str = "account/follow";
const SIGNOUT_SCOPE: &str = "account/signout";

const USER_NAME_LEN: std::ops::RangeInclusive<usize> = 3..=20;
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 4..=30;

pub fn controller() -> Controller {
    Controller::new("account")
        .auth_actions(&["index", "signout", "follow"])
        .action("signup", signup)
        .action("register", register)
        .action("index", index)
        .action("signin", signin)
        .action("authenticate", authenticate)
        .action("signout", signout)
        .action("follow", follow)
}

fn signup(ctx: &mut ActionContext<'_>) -> ActionResult {
    if ctx.session.is_authenticated() {
        return ctx.redirect("/account");
    }
    render_signup(ctx, "", "", &[])
}

fn register(ctx: &mut ActionContext<'_>) -> ActionResult {
    if ctx.session.is_authenticated() {
        return ctx.redirect("/account");
    }

    ctx.require_post()?;

    if !ctx.check_csrf_token(SIGNUP_SCOPE) {
        return ctx.redirect("/account/signup");
    }

    let user_name = ctx.form("user_name");
    let password = ctx.form("password");

    let mut errors = validate_user_name(user_name);
    if errors.is_empty() && !ctx.repos.users.is_unique_user_name(user_name) {
        errors.push(taken());
    }
    errors.extend(validate_password(password));

    if !errors.is_empty() {
        return render_signup(ctx, user_name, password, &errors);
    }

    let user = match ctx.repos.users.insert(user_name, password) {
        Ok(user) => user,
        // Lost a race with a concurrent registration.
        Err(RepositoryError::DuplicateUserName(_)) => {
            return render_signup(ctx, user_name, password, &[taken()]);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, user_name = %user.user_name, "User registered");
    ctx.sign_in(&user)?;

    ctx.redirect("/")
}

fn index(ctx: &mut ActionContext<'_>) -> ActionResult {
    let user = ctx.current_user()?;
    let followings = ctx.repos.users.fetch_all_followings_by_user_id(user.id);
    let token = ctx.generate_csrf_token(SIGNOUT_SCOPE)?;

    ctx.render(views::account::index(&user, &followings, &token))
}

fn signin(ctx: &mut ActionContext<'_>) -> ActionResult {
    if ctx.session.is_authenticated() {
        return ctx.redirect("/account");
    }
    render_signin(ctx, "", "", &[])
}

fn authenticate(ctx: &mut ActionContext<'_>) -> ActionResult {
    if ctx.session.is_authenticated() {
        return ctx.redirect("/account");
    }

    ctx.require_post()?;

    if !ctx.check_csrf_token(SIGNIN_SCOPE) {
        return ctx.redirect("/account/signin");
    }

    let user_name = ctx.form("user_name");
    let password = ctx.form("password");

    let mut errors = Vec::new();
    if user_name.is_empty() {
        errors.push("Enter a user name.".to_string());
    }
    if password.is_empty() {
        errors.push("Enter a password.".to_string());
    }

    if errors.is_empty() {
        let repos = ctx.repos;
        match repos.users.fetch_by_user_name(user_name) {
            Some(user) if repos.users.verify_password(&user, password) => {
                ctx.sign_in(&user)?;
                return ctx.redirect("/");
            }
            _ => {
                tracing::info!(user_name = %user_name, "Sign-in rejected");
                errors.push("Invalid user name or password.".to_string());
            }
        }
    }

    render_signin(ctx, user_name, password, &errors)
}

fn signout(ctx: &mut ActionContext<'_>) -> ActionResult {
    ctx.require_post()?;

    if !ctx.check_csrf_token(SIGNOUT_SCOPE) {
        return ctx.redirect("/account");
    }

    ctx.sign_out();
    ctx.redirect("/account/signin")
}

fn follow(ctx: &mut ActionContext<'_>) -> ActionResult {
    ctx.require_post()?;

    let following_name = ctx.form("following_name");
    if following_name.is_empty() {
        return Err(ActionError::not_found("following_name is required"));
    }
    if following_name.chars().any(char::is_control) {
        return Err(ActionError::not_found("following_name contains control characters"));
    }

    if !ctx.check_csrf_token(FOLLOW_SCOPE) {
        return ctx.redirect(format!("/user/{}", following_name));
    }

    let target = ctx
        .repos
        .users
        .fetch_by_user_name(following_name)
        .ok_or_else(|| ActionError::not_found(format!("user '{}' does not exist", following_name)))?;

    let user = ctx.current_user()?;
    if user.id != target.id && !ctx.repos.followings.is_following(user.id, target.id) {
        ctx.repos.followings.insert(user.id, target.id)?;
        tracing::info!(user_id = user.id, following_id = target.id, "Now following");
    }

    ctx.redirect("/account")
}

fn render_signup(
    ctx: &mut ActionContext<'_>,
    user_name: &str,
    password: &str,
    errors: &[String],
) -> ActionResult {
    let token = ctx.generate_csrf_token(SIGNUP_SCOPE)?;
    ctx.render(views::account::signup(&CredentialsForm {
        user_name,
        password,
        errors,
        token: &token,
    }))
}

fn render_signin(
    ctx: &mut ActionContext<'_>,
    user_name: &str,
    password: &str,
    errors: &[String],
) -> ActionResult {
    let token = ctx.generate_csrf_token(SIGNIN_SCOPE)?;
    ctx.render(views::account::signin(&CredentialsForm {
        user_name,
        password,
        errors,
        token: &token,
    }))
}

fn taken() -> String {
    "That user name is already taken.".to_string()
}

/// ASCII word characters only, 3 to 20 of them.
fn validate_user_name(user_name: &str) -> Vec<String> {
    if user_name.is_empty() {
        return vec!["Enter a user name.".to_string()];
    }
    let word_chars = user_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !word_chars || !USER_NAME_LEN.contains(&user_name.len()) {
        return vec!["User names must be 3 to 20 letters, digits or underscores.".to_string()];
    }
    Vec::new()
}

fn validate_password(password: &str) -> Vec<String> {
    if password.is_empty() {
        return vec!["Enter a password.".to_string()];
    }
    if !PASSWORD_LEN.contains(&password.chars().count()) {
        return vec!["Passwords must be 4 to 30 characters.".to_string()];
    }
    Vec::new()
}
