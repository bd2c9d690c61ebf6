//! End-to-end dispatch tests over a real listener.

use axum::http::StatusCode;
use miniblog::config::AppConfig;

mod common;
use common::{extract_token, location, start_server, Browser};

async fn sign_up(browser: &mut Browser, server: &common::TestServer, name: &str) {
    let page = browser.get(&server.url("/account/signup")).await;
    assert_eq!(page.status(), StatusCode::OK);
    let token = extract_token(&page.text().await.unwrap());

    let response = browser
        .post(
            &server.url("/account/register"),
            &[("user_name", name), ("password", "secret"), ("_token", token.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_signup_post_and_read_timeline() {
    let server = start_server(AppConfig::default()).await;
    let mut alice = Browser::new();
    sign_up(&mut alice, &server, "alice").await;

    let home = alice.get(&server.url("/")).await;
    assert_eq!(home.status(), StatusCode::OK);
    let token = extract_token(&home.text().await.unwrap());

    let response = alice
        .post(&server.url("/status/post"), &[("body", "hello"), ("_token", token.as_str())])
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let home = alice.get(&server.url("/")).await.text().await.unwrap();
    assert!(home.contains("hello"));
    assert!(home.contains("alice"));
}

#[tokio::test]
async fn test_anonymous_home_renders_signin() {
    let server = start_server(AppConfig::default()).await;
    let mut browser = Browser::new();

    let response = browser.get(&server.url("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("action=\"/account/authenticate\""));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = start_server(AppConfig::default()).await;
    let mut browser = Browser::new();

    let response = browser.get(&server.url("/nonexistent/path")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Page not found."));
}

#[tokio::test]
async fn test_debug_404_shows_reason() {
    let mut config = AppConfig::default();
    config.app.debug = true;
    let server = start_server(config).await;
    let mut browser = Browser::new();

    let response = browser.get(&server.url("/account/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("account/nope"));
}

#[tokio::test]
async fn test_follow_is_idempotent() {
    let server = start_server(AppConfig::default()).await;

    let mut bob = Browser::new();
    sign_up(&mut bob, &server, "bob").await;

    let mut alice = Browser::new();
    sign_up(&mut alice, &server, "alice").await;

    let profile = alice.get(&server.url("/user/bob")).await.text().await.unwrap();
    let token = extract_token(&profile);

    for _ in 0..2 {
        let response = alice
            .post(
                &server.url("/account/follow"),
                &[("following_name", "bob"), ("_token", token.as_str())],
            )
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/account");
    }

    let profile = alice.get(&server.url("/user/bob")).await.text().await.unwrap();
    assert!(!profile.contains("following_name"));
    assert!(profile.contains("Following"));

    let account = alice.get(&server.url("/account")).await.text().await.unwrap();
    assert_eq!(account.matches("href=\"/user/bob\"").count(), 1);
}

#[tokio::test]
async fn test_csrf_mismatch_redirects_back() {
    let server = start_server(AppConfig::default()).await;
    let mut browser = Browser::new();

    let response = browser
        .post(
            &server.url("/account/register"),
            &[("user_name", "mallory"), ("password", "secret"), ("_token", "forged")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/account/signup");

    let response = browser.get(&server.url("/user/mallory")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signout_then_protected_page_shows_signin() {
    let server = start_server(AppConfig::default()).await;
    let mut alice = Browser::new();
    sign_up(&mut alice, &server, "alice").await;

    let account = alice.get(&server.url("/account")).await.text().await.unwrap();
    let token = extract_token(&account);

    let response = alice
        .post(&server.url("/account/signout"), &[("_token", token.as_str())])
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/account/signin");

    let body = alice.get(&server.url("/account")).await.text().await.unwrap();
    assert!(body.contains("action=\"/account/authenticate\""));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let server = start_server(AppConfig::default()).await;
    let mut browser = Browser::new();

    let response = browser.get(&server.url("/account/signin")).await;
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().contains_key("set-cookie"));
}
