use std::time::Duration;

use async_trait::async_trait;

use super::{Notifier, NotifyError};
use crate::domain::subscriber::Email;

pub const CONFIRMATION: &str = "Thanks — check your inbox!";

/// Used when no backend is configured, so the form can be exercised locally.
/// Waits `delay` and always succeeds; nothing leaves the process.
#[derive(Clone, Debug)]
pub struct Simulated {
    delay: Duration,
}

impl Simulated {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Notifier for Simulated {
    async fn deliver(&self, email: &Email) -> Result<String, NotifyError> {
        tracing::warn!(%email, "no subscribe endpoint configured; using local fallback");
        tokio::time::sleep(self.delay).await;
        Ok(CONFIRMATION.to_owned())
    }
}
