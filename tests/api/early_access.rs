use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, body_partial_json, header, method, path},
};

use crate::helpers::{OPERATOR_INBOX, SENDER, spawn_app};

fn email_of_length(length: usize) -> String {
    let domain = "@example.com";
    format!("{}{domain}", "a".repeat(length - domain.len()))
}

async fn error_of(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Response is not JSON.");
    body["error"]
        .as_str()
        .expect("Response has no `error` field.")
        .to_string()
}

#[tokio::test]
async fn early_access_returns_200_for_a_valid_email() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "49a3999c" })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_early_access_json(&json!({ "email": "user@example.com" }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn early_access_notifies_the_operator_with_reply_to_set_to_the_applicant() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "from": SENDER,
            "to": [OPERATOR_INBOX],
            "reply_to": "user@example.com",
            "subject": "New Early Access signup",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_early_access_json(&json!({ "email": "user@example.com" }))
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn early_access_notification_mentions_the_applicant_and_source() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    app.post_early_access_json(&json!({ "email": "user@example.com", "source": "footer-desktop" }))
        .await;

    let received_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&received_request.body).unwrap();

    let html = body["html"].as_str().unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(html.contains("user@example.com"));
    assert!(html.contains("footer-desktop"));
    assert!(text.contains("Email: user@example.com"));
    assert!(text.contains("Source: footer-desktop"));
}

#[tokio::test]
async fn early_access_returns_400_when_email_is_missing() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (json!({}), "missing the email"),
        (json!({ "email": null }), "a null email"),
        (json!({ "email": 42 }), "a numeric email"),
        (json!({ "email": { "address": "user@example.com" } }), "an object email"),
        (json!({ "email": "" }), "an empty email"),
        (json!(["user@example.com"]), "an array body"),
    ];

    for (body, description) in test_cases {
        let response = app.post_early_access_json(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        assert_eq!(error_of(response).await, "Email is required");
    }
}

#[tokio::test]
async fn early_access_returns_400_when_email_is_invalid() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        ("definitely-not-an-email".to_string(), "no @"),
        ("@example.com".to_string(), "no local part"),
        ("user@".to_string(), "no domain"),
        ("user@localhost".to_string(), "no dot in the domain"),
        ("user@example.".to_string(), "nothing after the dot"),
        ("us er@example.com".to_string(), "a space"),
        (" user@example.com".to_string(), "leading whitespace"),
        ("user@@example.com".to_string(), "a doubled @"),
        (email_of_length(255), "255 characters"),
    ];

    for (email, description) in test_cases {
        let response = app.post_early_access_json(&json!({ "email": email })).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the email had {}.",
            description
        );
        assert_eq!(error_of(response).await, "Invalid email");
    }
}

#[tokio::test]
async fn early_access_accepts_a_254_character_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_early_access_json(&json!({ "email": email_of_length(254) }))
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn early_access_returns_500_when_the_provider_fails() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_early_access_json(&json!({ "email": "user@example.com" }))
        .await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(error_of(response).await, "Email failed to send");
}

#[tokio::test]
async fn early_access_returns_500_when_the_provider_is_too_slow() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_early_access_json(&json!({ "email": "user@example.com" }))
        .await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(error_of(response).await, "Email failed to send");
}

#[tokio::test]
async fn early_access_returns_500_for_a_malformed_body() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (r#"{"email": "#, "truncated JSON"),
        ("email=user%40example.com", "a form-encoded body"),
        ("", "an empty body"),
    ];

    for (body, description) in test_cases {
        let response = app.post_early_access(body.into()).await;

        assert_eq!(
            500,
            response.status().as_u16(),
            "The API did not return a 500 when the payload was {}.",
            description
        );
        assert_eq!(error_of(response).await, "Internal server error");
    }
}

#[tokio::test]
async fn each_submission_sends_its_own_notification() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    for _ in 0..2 {
        let response = app
            .post_early_access_json(&json!({ "email": "user@example.com" }))
            .await;
        assert_eq!(200, response.status().as_u16());
    }
}
