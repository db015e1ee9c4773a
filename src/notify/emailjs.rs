use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Notifier, NotifyError};
use crate::domain::subscriber::Email;

pub const CONFIRMATION: &str = "Subscription confirmed — check your mail!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
}

/// Sends the address through the EmailJS REST API, as the `user_email`
/// template parameter.
#[derive(Clone, Debug)]
pub struct EmailJs {
    http_client: Client,
    credentials: EmailJsCredentials,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    user_email: &'a str,
}

impl EmailJs {
    pub fn new(http_client: Client, credentials: EmailJsCredentials) -> Self {
        Self {
            http_client,
            credentials,
        }
    }
}

#[async_trait]
impl Notifier for EmailJs {
    #[tracing::instrument(name = "sending through emailjs", skip(self, email), fields(email = %email))]
    async fn deliver(&self, email: &Email) -> Result<String, NotifyError> {
        let body = SendEmailRequest {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.user_id,
            template_params: TemplateParams {
                user_email: email.as_ref(),
            },
        };

        let response = self
            .http_client
            .post(&self.credentials.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Relay(status));
        }

        Ok(CONFIRMATION.to_owned())
    }
}
