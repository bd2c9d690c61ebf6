//! Application controllers.
//!
//! | Controller | Actions | Requires authentication |
//! |------------|---------|-------------------------|
//! | `status`   | index, post, user, show | index, post |
//! | `account`  | signup, register, index, signin, authenticate, signout, follow | index, signout, follow |

pub mod account;
pub mod status;

use crate::dispatch::ControllerRegistry;

/// Registry holding every bundled controller.
pub fn registry() -> ControllerRegistry {
    ControllerRegistry::new()
        .register(status::controller())
        .register(account::controller())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dispatch::{Application, Outcome};
    use crate::http::{Request, Response};
    use crate::models::Repositories;
    use crate::security::{csrf, PasswordHasher};
    use crate::session::{Session, SessionStore};

    struct Harness {
        app: Application,
        store: SessionStore,
        session_id: Option<String>,
    }

    impl Harness {
        fn new() -> Self {
            let repos = Repositories::in_memory(PasswordHasher::new("test-salt"));
            let mut config = AppConfig::default();
            config.app.debug = true;
            Self {
                app: Application::new(&config, repos).unwrap(),
                store: SessionStore::new(),
                session_id: None,
            }
        }

        fn send(&mut self, request: Request) -> (Response, Outcome) {
            let mut session = self.store.start(self.session_id.as_deref());
            let result = self.app.dispatch(&request, &mut session);
            self.session_id = Some(self.store.commit(session).as_str().to_string());
            result
        }

        fn session(&self) -> Session {
            self.store.start(self.session_id.as_deref())
        }

        /// Issue a token the way a rendered form would.
        fn token(&mut self, scope: &str) -> String {
            let mut session = self.session();
            let token = csrf::issue(scope, &mut session).unwrap();
            self.session_id = Some(self.store.commit(session).as_str().to_string());
            token
        }

        fn signup(&mut self, name: &str) {
            let token = self.token("account/signup");
            let (response, _) = self.send(Request::post(
                "/account/register",
                [("user_name", name), ("password", "secret"), ("_token", token.as_str())],
            ));
            assert_eq!(response, Response::redirect("/"));
        }

        fn signout(&mut self) -> Response {
            let token = self.token("account/signout");
            self.send(Request::post("/account/signout", [("_token", token.as_str())])).0
        }
    }

    #[test]
    fn test_signup_post_and_timeline() {
        let mut h = Harness::new();
        h.signup("alice");
        assert!(h.session().is_authenticated());

        let token = h.token("status/post");
        let (response, _) = h.send(Request::post("/status/post", [("body", "hello"), ("_token", token.as_str())]));
        assert_eq!(response, Response::redirect("/"));

        let (response, outcome) = h.send(Request::get("/"));
        assert_eq!(outcome, Outcome::Rendered);
        assert!(response.body().contains("hello"));
        assert!(response.body().contains("alice"));
    }

    #[test]
    fn test_anonymous_home_shows_signin() {
        let mut h = Harness::new();
        let (response, outcome) = h.send(Request::get("/"));
        assert_eq!(outcome, Outcome::LoginFallback);
        assert!(response.body().contains("action=\"/account/authenticate\""));
    }

    #[test]
    fn test_register_validation_rerenders_form() {
        let mut h = Harness::new();
        let token = h.token("account/signup");
        let (response, _) = h.send(Request::post(
            "/account/register",
            [("user_name", "a!"), ("password", ""), ("_token", token.as_str())],
        ));
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert!(response.body().contains("User names must be 3 to 20"));
        assert!(response.body().contains("Enter a password."));
        assert!(!h.session().is_authenticated());
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut h = Harness::new();
        h.signup("alice");
        h.signout();

        let token = h.token("account/signup");
        let (response, _) = h.send(Request::post(
            "/account/register",
            [("user_name", "alice"), ("password", "other"), ("_token", token.as_str())],
        ));
        assert!(response.body().contains("That user name is already taken."));
    }

    #[test]
    fn test_csrf_mismatch_redirects() {
        let mut h = Harness::new();
        let (response, _) = h.send(Request::post(
            "/account/register",
            [("user_name", "alice"), ("password", "secret"), ("_token", "forged")],
        ));
        assert_eq!(response, Response::redirect("/account/signup"));

        let (response, _) = h.send(Request::post(
            "/account/authenticate",
            [("user_name", "alice"), ("password", "secret")],
        ));
        assert_eq!(response, Response::redirect("/account/signin"));
    }

    #[test]
    fn test_signin_round_trip() {
        let mut h = Harness::new();
        h.signup("alice");
        let response = h.signout();
        assert_eq!(response, Response::redirect("/account/signin"));
        assert!(!h.session().is_authenticated());

        let token = h.token("account/signin");
        let (response, _) = h.send(Request::post(
            "/account/authenticate",
            [("user_name", "alice"), ("password", "wrong"), ("_token", token.as_str())],
        ));
        assert!(response.body().contains("Invalid user name or password."));

        let token = h.token("account/signin");
        let (response, _) = h.send(Request::post(
            "/account/authenticate",
            [("user_name", "alice"), ("password", "secret"), ("_token", token.as_str())],
        ));
        assert_eq!(response, Response::redirect("/"));

        let (response, _) = h.send(Request::get("/account/signin"));
        assert_eq!(response, Response::redirect("/account"));
    }

    #[test]
    fn test_follow_once() {
        let mut h = Harness::new();
        h.signup("bob");
        h.signout();
        h.signup("alice");

        for _ in 0..2 {
            let token = h.token("account/follow");
            let (response, _) = h.send(Request::post(
                "/account/follow",
                [("following_name", "bob"), ("_token", token.as_str())],
            ));
            assert_eq!(response, Response::redirect("/account"));
        }
        assert_eq!(h.app.repositories().followings.count(), 1);

        let (response, _) = h.send(Request::get("/account"));
        assert!(response.body().contains("/user/bob"));
    }

    #[test]
    fn test_follow_edge_cases() {
        let mut h = Harness::new();
        h.signup("alice");

        let token = h.token("account/follow");
        let (response, _) = h.send(Request::post("/account/follow", [("_token", token.as_str())]));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let (response, _) = h.send(Request::post(
            "/account/follow",
            [("following_name", "ghost"), ("_token", token.as_str())],
        ));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let (response, _) = h.send(Request::post(
            "/account/follow",
            [("following_name", "bob"), ("_token", "forged")],
        ));
        assert_eq!(response, Response::redirect("/user/bob"));

        let (response, _) = h.send(Request::post(
            "/account/follow",
            [("following_name", "alice"), ("_token", token.as_str())],
        ));
        assert_eq!(response, Response::redirect("/account"));
        assert_eq!(h.app.repositories().followings.count(), 0);
    }

    #[test]
    fn test_get_on_post_only_action_is_404() {
        let mut h = Harness::new();
        let (response, _) = h.send(Request::get("/account/register"));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        h.signup("alice");
        let (response, _) = h.send(Request::get("/account/signout"));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
        assert!(h.session().is_authenticated());
    }

    #[test]
    fn test_signed_in_credentials_actions_redirect_to_account() {
        let mut h = Harness::new();
        h.signup("alice");

        for path in ["/account/register", "/account/authenticate"] {
            let (response, _) = h.send(Request::get(path));
            assert_eq!(response, Response::redirect("/account"), "{path}");
        }
    }

    #[test]
    fn test_signout_requires_token() {
        let mut h = Harness::new();
        h.signup("alice");

        let (response, _) = h.send(Request::post("/account/signout", [("_token", "forged")]));
        assert_eq!(response, Response::redirect("/account"));
        assert!(h.session().is_authenticated());
    }

    #[test]
    fn test_profile_and_show() {
        let mut h = Harness::new();
        h.signup("bob");
        let token = h.token("status/post");
        h.send(Request::post("/status/post", [("body", "<b>hi</b>"), ("_token", token.as_str())]));
        h.signout();

        let (response, _) = h.send(Request::get("/user/bob"));
        assert!(response.body().contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!response.body().contains("following_name"));

        let (response, _) = h.send(Request::get("/user/bob/status/1"));
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let (response, _) = h.send(Request::get("/user/alice/status/1"));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let (response, _) = h.send(Request::get("/user/bob/status/abc"));
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        h.signup("alice");
        let (response, _) = h.send(Request::get("/user/bob"));
        assert!(response.body().contains("following_name"));
    }
}
