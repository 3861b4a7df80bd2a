use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{spawn_test_app, spawn_test_app_with_welcome};

async fn body_message(res: reqwest::Response) -> Result<String> {
    let body: Value = res.json().await?;
    Ok(body["message"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn register_ok_persists_one_record() -> Result<()> {
    let app = spawn_test_app().await?;

    let res = app.post_register(&json!({ "email": "a@b.com" })).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["access-control-allow-origin"].to_str()?,
        "*"
    );
    assert_eq!(body_message(res).await?, "Successfully registered!");

    assert_eq!(app.stored_emails().await?, vec!["a@b.com".to_string()]);

    Ok(())
}

#[tokio::test]
async fn register_missing_or_empty_email_is_a_400() -> Result<()> {
    let app = spawn_test_app().await?;

    let cases = [
        (json!({}), "missing email"),
        (json!({ "email": null }), "null email"),
        (json!({ "email": "" }), "empty email"),
    ];

    for (body, description) in cases {
        let res = app.post_register(&body).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong status for request with {description}"
        );
        // Error branches carry the CORS headers too.
        assert_eq!(
            res.headers()["access-control-allow-origin"].to_str()?,
            "*"
        );
        assert_eq!(body_message(res).await?, "Email is required");
    }

    assert!(app.stored_emails().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn register_invalid_json_is_a_500() -> Result<()> {
    let app = spawn_test_app().await?;

    let res = app.post_register_raw("not json at all {").await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.headers()["access-control-allow-origin"].to_str()?,
        "*"
    );
    assert_eq!(body_message(res).await?, "Internal Server Error");

    assert!(app.stored_emails().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn register_preflight_answers_without_business_logic() -> Result<()> {
    let app = spawn_test_app_with_welcome().await?;

    // No store write, no email send.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app.send_register(reqwest::Method::OPTIONS).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers().clone();
    assert_eq!(headers["access-control-allow-origin"].to_str()?, "*");
    assert_eq!(
        headers["access-control-allow-methods"].to_str()?,
        "OPTIONS, POST"
    );
    assert_eq!(
        headers["access-control-allow-headers"].to_str()?,
        "Content-Type"
    );
    assert_eq!(res.text().await?, "OK");

    assert!(app.stored_emails().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn register_other_methods_are_a_405() -> Result<()> {
    let app = spawn_test_app().await?;

    for http_method in [
        reqwest::Method::GET,
        reqwest::Method::PUT,
        reqwest::Method::DELETE,
    ] {
        let res = app.send_register(http_method.clone()).await?;
        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "Wrong status for {http_method}"
        );
        assert_eq!(
            res.headers()["access-control-allow-origin"].to_str()?,
            "*"
        );
        assert_eq!(body_message(res).await?, "Method Not Allowed");
    }

    Ok(())
}

#[tokio::test]
async fn register_with_welcome_sends_one_email() -> Result<()> {
    let app = spawn_test_app_with_welcome().await?;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_register(&json!({ "email": "a@b.com" })).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_message(res).await?,
        "Successfully registered and email sent!"
    );
    assert_eq!(app.stored_emails().await?, vec!["a@b.com".to_string()]);

    Ok(())
}

#[tokio::test]
async fn register_welcome_send_failure_still_persists_the_record() -> Result<()> {
    let app = spawn_test_app_with_welcome().await?;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_register(&json!({ "email": "a@b.com" })).await?;

    // Non-atomic on purpose: the caller sees a failure yet the record exists.
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_message(res).await?, "Internal Server Error");
    assert_eq!(app.stored_emails().await?, vec!["a@b.com".to_string()]);

    Ok(())
}

#[tokio::test]
async fn register_store_failure_skips_the_welcome_send() -> Result<()> {
    let app = spawn_test_app_with_welcome().await?;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Sabotage the store.
    sqlx::query("DROP TABLE users").execute(app.dm.db()).await?;

    let res = app.post_register(&json!({ "email": "a@b.com" })).await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_message(res).await?, "Internal Server Error");

    Ok(())
}

#[tokio::test]
async fn register_twice_keeps_a_single_record() -> Result<()> {
    let app = spawn_test_app_with_welcome().await?;

    // No dedup of notifications: both registrations trigger a send.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    for _ in 0..2 {
        let res = app.post_register(&json!({ "email": "a@b.com" })).await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert_eq!(app.stored_emails().await?, vec!["a@b.com".to_string()]);

    Ok(())
}

#[tokio::test]
async fn register_accepts_opaque_email_strings() -> Result<()> {
    let app = spawn_test_app().await?;

    // The address is opaque by contract; no format validation on the service.
    let res = app
        .post_register(&json!({ "email": "definitely-not-an-email" }))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        app.stored_emails().await?,
        vec!["definitely-not-an-email".to_string()]
    );

    Ok(())
}
