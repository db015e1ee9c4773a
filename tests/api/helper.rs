use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use sparkchat::{
    app::App,
    config::{get_configuration, NotifySettings, Settings},
    telemetry::get_subscriber,
};
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "sparkchat=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

pub struct TestApp {
    pub addr: String,
    /// Stands in for both the subscribe API and the EmailJS relay.
    pub backend: MockServer,
}

impl TestApp {
    pub async fn get_home(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/", &self.addr))
            .send()
            .await
            .expect("The request should succeed.")
    }

    /// Opens the landing page and returns the id of its notify form.
    pub async fn open_page(&self) -> String {
        let html = self.get_home().await.text().await.unwrap();
        view_id(&html)
    }

    /// Resolves once the mock backend has received a request, i.e. once a
    /// submission is past validation and sending.
    pub async fn wait_for_backend_call(&self) {
        for _ in 0..200 {
            let received = self.backend.received_requests().await.unwrap_or_default();
            if !received.is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("The backend never received a request.");
    }

    pub fn notify_form_request(&self, view: &str, email: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .post(format!("{}/subscribe", &self.addr))
            .header("HX-Request", "true")
            .form(&[("view", view), ("email", email)])
    }

    pub async fn post_notify_form(&self, view: &str, email: &str) -> reqwest::Response {
        self.notify_form_request(view, email)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_api_subscribe(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/subscribe", &self.addr))
            .json(&serde_json::from_str::<Value>(body).unwrap())
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_api_subscribe_for_view(&self, view: &str, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/subscribe?view={}", &self.addr, view))
            .json(&serde_json::from_str::<Value>(body).unwrap())
            .send()
            .await
            .expect("The request should succeed.")
    }
}

/// No backend configured: submissions use the local simulation.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_, _| {}).await
}

/// Spawns the app against a fresh mock backend. `configure` decides which
/// delivery strategy is active.
pub async fn spawn_app_with(configure: impl FnOnce(&mut NotifySettings, &MockServer)) -> TestApp {
    Lazy::force(&TRACING);

    let backend = MockServer::start().await;
    let mut config: Settings = get_configuration().expect("Failed to read configuration.");
    config.application.host = "127.0.0.1".into();
    config.application.port = 0;
    config.notify = NotifySettings {
        emailjs_endpoint: format!("{}/api/v1.0/email/send", backend.uri()),
        simulated_delay_milliseconds: 200,
        ..Default::default()
    };
    configure(&mut config.notify, &backend);

    let app = App::with(config)
        .await
        .expect("The application should bind a port.");

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port()),
        backend,
    };

    let _ = tokio::spawn(async move { app.serve().await.expect("The server should be running") });

    test_app
}

/// Reads the `value` of the hidden `view` input, wherever its attributes sit.
pub fn view_id(html: &str) -> String {
    let input = html
        .split('<')
        .find(|tag| tag.starts_with("input") && tag.contains(r#"name="view""#))
        .expect("The page should carry a view input.");
    let value = input
        .split_once(r#"value=""#)
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(value, _)| value)
        .expect("The view input should have a value.");

    Uuid::parse_str(value)
        .expect("The view id should be a UUID.")
        .to_string()
}

#[test]
fn view_id_ignores_attribute_order() {
    let id = "67e55044-10b1-426f-9247-bb680a5fe0c8";
    for html in [
        format!(r#"<form><input type="hidden" name="view" value="{}" /></form>"#, id),
        format!(r#"<input value="{}" name="view" type="hidden">"#, id),
        format!(
            r#"<input name="email" value="x" /><input name="view" value="{}"/>"#,
            id
        ),
    ] {
        assert_eq!(view_id(&html), id);
    }
}

pub fn get_client() -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
