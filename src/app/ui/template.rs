use askama::Template;
use chrono::Datelike;
use uuid::Uuid;

use crate::{
    app::AppState,
    submission::{FormState, Status},
};

/// The notify form as rendered for one page view.
pub struct NotifyForm {
    pub view: Uuid,
    pub email: String,
    pub sending: bool,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl NotifyForm {
    pub fn new(view: Uuid, state: FormState) -> Self {
        let (sending, success, error) = match state.status {
            Status::Idle => (false, None, None),
            Status::Sending => (true, None, None),
            Status::Success(message) => (false, Some(message), None),
            Status::Error(message) => (false, None, Some(message)),
        };

        Self {
            view,
            email: state.email,
            sending,
            success,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub form: NotifyForm,
    pub year: i32,
    pub repository_url: String,
}

impl HomeTemplate {
    pub fn new(state: &AppState, form: NotifyForm) -> Self {
        Self {
            form,
            year: chrono::Utc::now().year(),
            repository_url: state.repository_url.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "notify.html")]
pub struct NotifyTemplate {
    pub form: NotifyForm,
}
