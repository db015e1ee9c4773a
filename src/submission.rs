//! The email-capture form: its field value, its status, and the submit flow.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    domain::subscriber::Email,
    notify::{Notifier, NotifyError},
};

/// Lifecycle of one submission attempt. A message only exists once an attempt
/// has finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Sending,
    Success(String),
    Error(String),
}

impl Status {
    pub fn is_sending(&self) -> bool {
        matches!(self, Status::Sending)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Status::Success(message) | Status::Error(message) => Some(message),
            Status::Idle | Status::Sending => None,
        }
    }
}

/// What the form currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub status: Status,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("a subscription is already being sent")]
    InFlight,
    #[error("{0}")]
    InvalidEmail(String),
    #[error(transparent)]
    Delivery(#[from] NotifyError),
}

/// Owns the form state of one page view.
///
/// At most one delivery is outstanding at a time; `submit` refuses to start
/// while the status is [`Status::Sending`].
#[derive(Debug)]
pub struct Submitter {
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<FormState>,
}

impl Submitter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self { notifier, state }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status.clone()
    }

    pub fn email(&self) -> String {
        self.state.borrow().email.clone()
    }

    pub fn is_sending(&self) -> bool {
        self.state.borrow().status.is_sending()
    }

    /// Observe every transition of the form.
    pub fn watch(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Validates `email` and, when it looks like an address, delivers it.
    ///
    /// On success returns the confirmation message and clears the field. The
    /// status is updated in every case except [`SubmitError::InFlight`].
    #[tracing::instrument(name = "submitting subscription", skip(self, email), fields(email = %email))]
    pub async fn submit(&self, email: String) -> Result<String, SubmitError> {
        let mut claimed: Result<Email, SubmitError> = Err(SubmitError::InFlight);

        // Checking for an outstanding delivery and claiming the slot happen under
        // the same lock.
        self.state.send_if_modified(|state| {
            if state.status.is_sending() {
                return false;
            }

            state.email = email.clone();
            match Email::try_from(email) {
                Ok(email) => {
                    state.status = Status::Sending;
                    claimed = Ok(email);
                }
                Err(message) => {
                    state.status = Status::Error(message.clone());
                    claimed = Err(SubmitError::InvalidEmail(message));
                }
            }
            true
        });

        let email = claimed.map_err(|e| {
            tracing::debug!(error = %e, "submission refused");
            e
        })?;

        match self.notifier.deliver(&email).await {
            Ok(message) => {
                self.state.send_modify(|state| {
                    state.email.clear();
                    state.status = Status::Success(message.clone());
                });
                Ok(message)
            }
            Err(e) => {
                tracing::error!(error = ?e, "failed to deliver subscription");
                let message = e.user_message();
                self.state.send_modify(|state| {
                    state.status = Status::Error(message);
                });
                Err(SubmitError::Delivery(e))
            }
        }
    }
}
