use std::time::Duration;

use serde_json::Value;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, spawn_app_with};

#[tokio::test]
async fn subscribe_returns_200_for_a_valid_email() {
    let app = spawn_app_with(|notify, backend| {
        notify.subscribe_api = Some(format!("{}/subscribe", backend.uri()));
    })
    .await;

    Mock::given(path("/subscribe"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_api_subscribe(r#"{"email": "bulbasaur@mail.com"}"#)
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Thanks — check your inbox for confirmation!");
}

#[tokio::test]
async fn subscribe_returns_a_400_for_an_invalid_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    let test_cases = [
        (r#"{"email": ""}"#, "empty email"),
        (r#"{"email": "definitely-not-an-email"}"#, "missing @"),
        (r#"{"email": "bulbasaur@mail"}"#, "no dot after @"),
    ];

    for (body, description) in test_cases {
        let response = app.post_api_subscribe(body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Please enter a valid email address.");
        assert_eq!(body["details"][0]["field"], "email");
    }
}

#[tokio::test]
async fn subscribe_returns_a_422_when_the_email_is_missing() {
    let app = spawn_app().await;

    let response = app.post_api_subscribe("{}").await;

    assert_eq!(422, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_returns_a_502_when_the_backend_fails() {
    let app = spawn_app_with(|notify, backend| {
        notify.subscribe_api = Some(format!("{}/subscribe", backend.uri()));
    })
    .await;

    Mock::given(path("/subscribe"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_api_subscribe(r#"{"email": "bulbasaur@mail.com"}"#)
        .await;

    assert_eq!(502, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Server error 500");
}

#[tokio::test]
async fn subscribe_reports_emailjs_failures_generically() {
    let app = spawn_app_with(|notify, _| {
        notify.emailjs_service = Some("service".into());
        notify.emailjs_template = Some("template".into());
        notify.emailjs_user = Some("user".into());
    })
    .await;

    Mock::given(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_api_subscribe(r#"{"email": "bulbasaur@mail.com"}"#)
        .await;

    assert_eq!(502, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "EmailJS request failed");
}

#[tokio::test]
async fn subscribe_with_a_view_shares_that_page_form() {
    let app = spawn_app_with(|notify, backend| {
        notify.subscribe_api = Some(format!("{}/subscribe", backend.uri()));
    })
    .await;

    Mock::given(path("/subscribe"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .expect(1)
        .mount(&app.backend)
        .await;

    let view = app.open_page().await;
    let api_call = tokio::spawn(
        reqwest::Client::new()
            .post(format!("{}/api/subscribe?view={}", app.addr, view))
            .json(&serde_json::json!({ "email": "bulbasaur@mail.com" }))
            .send(),
    );
    app.wait_for_backend_call().await;

    let response = app.post_notify_form(&view, "bulbasaur@mail.com").await;
    assert_eq!(409, response.status().as_u16());

    let conflicting = app
        .post_api_subscribe_for_view(&view, r#"{"email": "bulbasaur@mail.com"}"#)
        .await;
    assert_eq!(409, conflicting.status().as_u16());

    let response = api_call.await.unwrap().unwrap();
    assert_eq!(200, response.status().as_u16());
}
