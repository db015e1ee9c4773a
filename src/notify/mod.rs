//! Delivery of a captured address to whatever backend is configured.
//!
//! Exactly one [`Notifier`] is active per process, picked from
//! [`NotifySettings`] in priority order: the subscribe API, then EmailJS, then
//! the local simulation.

use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{config::NotifySettings, domain::subscriber::Email};

mod api;
mod emailjs;
mod simulated;

pub use self::api::SubscribeApi;
pub use self::emailjs::{EmailJs, EmailJsCredentials};
pub use self::simulated::Simulated;

#[async_trait]
pub trait Notifier: Debug + Send + Sync {
    /// Hands `email` over and returns the confirmation message to show.
    async fn deliver(&self, email: &Email) -> Result<String, NotifyError>;
}

#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    #[error("Server error {0}")]
    Server(u16),
    #[error("EmailJS request failed")]
    Relay(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl NotifyError {
    /// The text shown next to the form. Transport failures show reqwest's
    /// description, which always names the failing request.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    SubscribeApi { url: String },
    EmailJs(EmailJsCredentials),
    Simulated { delay: Duration },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl NotifySettings {
    pub fn strategy(&self) -> Strategy {
        if let Some(url) = non_empty(&self.subscribe_api) {
            return Strategy::SubscribeApi {
                url: url.to_owned(),
            };
        }

        if let (Some(service_id), Some(template_id), Some(user_id)) = (
            non_empty(&self.emailjs_service),
            non_empty(&self.emailjs_template),
            non_empty(&self.emailjs_user),
        ) {
            return Strategy::EmailJs(EmailJsCredentials {
                endpoint: self.emailjs_endpoint.clone(),
                service_id: service_id.to_owned(),
                template_id: template_id.to_owned(),
                user_id: user_id.to_owned(),
            });
        }

        Strategy::Simulated {
            delay: Duration::from_millis(self.simulated_delay_milliseconds),
        }
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SubscribeApi { .. } => "subscribe_api",
            Strategy::EmailJs(_) => "emailjs",
            Strategy::Simulated { .. } => "simulated",
        }
    }

    pub fn build(self, http_client: Client) -> Arc<dyn Notifier> {
        match self {
            Strategy::SubscribeApi { url } => Arc::new(SubscribeApi::new(http_client, url)),
            Strategy::EmailJs(credentials) => Arc::new(EmailJs::new(http_client, credentials)),
            Strategy::Simulated { delay } => Arc::new(Simulated::new(delay)),
        }
    }
}

pub fn from_settings(settings: &NotifySettings, http_client: Client) -> Arc<dyn Notifier> {
    let strategy = settings.strategy();
    tracing::info!(strategy = strategy.name(), "selected notification strategy");
    strategy.build(http_client)
}
