use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Notifier, NotifyError};
use crate::domain::subscriber::Email;

pub const CONFIRMATION: &str = "Thanks — check your inbox for confirmation!";

/// Posts `{"email": …}` to a self-hosted subscribe endpoint.
#[derive(Clone, Debug)]
pub struct SubscribeApi {
    http_client: Client,
    url: String,
}

#[derive(Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

impl SubscribeApi {
    pub fn new(http_client: Client, url: String) -> Self {
        Self { http_client, url }
    }
}

#[async_trait]
impl Notifier for SubscribeApi {
    #[tracing::instrument(name = "posting to the subscribe api", skip(self, email), fields(url = %self.url, email = %email))]
    async fn deliver(&self, email: &Email) -> Result<String, NotifyError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&SubscribeRequest {
                email: email.as_ref(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Server(status.as_u16()));
        }

        Ok(CONFIRMATION.to_owned())
    }
}
