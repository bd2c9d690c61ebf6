//! Status actions: timeline, posting, profiles, single statuses.

use crate::dispatch::{ActionContext, ActionError, ActionResult, Controller};
use crate::models::StatusId;
use crate::views;

const POST_SCOPE: &str = "status/post";
const FOLLOW_SCOPE: &str = "account/follow";

/// Longest accepted status body, in characters.
pub const MAX_BODY_CHARS: usize = 200;

pub fn controller() -> Controller {
    Controller::new("status")
        .auth_actions(&["index", "post"])
        .action("index", index)
        .action("post", post)
        .action("user", user)
        .action("show", show)
}

fn index(ctx: &mut ActionContext<'_>) -> ActionResult {
    render_timeline(ctx, "", &[])
}

fn post(ctx: &mut ActionContext<'_>) -> ActionResult {
    ctx.require_post()?;

    if !ctx.check_csrf_token(POST_SCOPE) {
        return ctx.redirect("/");
    }

    let body = ctx.form("body");
    let errors = validate_body(body);
    if !errors.is_empty() {
        return render_timeline(ctx, body, &errors);
    }

    let user = ctx.current_user()?;
    let status = ctx.repos.statuses.insert(user.id, body)?;
    tracing::info!(user_id = user.id, status_id = status.id, "Status posted");

    ctx.redirect("/")
}

fn user(ctx: &mut ActionContext<'_>) -> ActionResult {
    let user_name = ctx.path_param("user_name")?;
    let user = ctx
        .repos
        .users
        .fetch_by_user_name(user_name)
        .ok_or_else(|| ActionError::not_found(format!("user '{}' does not exist", user_name)))?;

    let statuses = ctx.repos.statuses.fetch_all_by_user_id(user.id);

    let mut following = None;
    let mut token = String::new();
    if ctx.session.is_authenticated() {
        let me = ctx.current_user()?;
        if me.id != user.id {
            let already = ctx.repos.followings.is_following(me.id, user.id);
            if !already {
                token = ctx.generate_csrf_token(FOLLOW_SCOPE)?;
            }
            following = Some(already);
        }
    }

    ctx.render(views::status::user(&user, &statuses, following, &token))
}

fn show(ctx: &mut ActionContext<'_>) -> ActionResult {
    let user_name = ctx.path_param("user_name")?;
    let id: StatusId = ctx
        .path_param("id")?
        .parse()
        .map_err(|_| ActionError::not_found("status id is not a number"))?;

    let status = ctx
        .repos
        .statuses
        .fetch_by_id_and_user_name(id, user_name)
        .ok_or_else(|| ActionError::not_found(format!("status {} of '{}' does not exist", id, user_name)))?;

    ctx.render(views::status::show(&status))
}

fn render_timeline(ctx: &mut ActionContext<'_>, body: &str, errors: &[String]) -> ActionResult {
    let user = ctx.current_user()?;
    let statuses = ctx.repos.statuses.fetch_all_personal_archives_by_user_id(user.id);
    let token = ctx.generate_csrf_token(POST_SCOPE)?;

    ctx.render(views::status::index(&user, &statuses, body, errors, &token))
}

fn validate_body(body: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if body.is_empty() {
        errors.push("Write something to post.".to_string());
    } else if body.chars().count() > MAX_BODY_CHARS {
        errors.push(format!("Posts must be {} characters or fewer.", MAX_BODY_CHARS));
    }
    errors
}
