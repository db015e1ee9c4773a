use axum::{extract::State, response::IntoResponse};

use super::template::{HomeTemplate, NotifyForm};
use crate::{app::AppState, submission::FormState};

#[tracing::instrument(name = "Home page", skip(state), fields(view = tracing::field::Empty))]
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.page_views.open();
    tracing::Span::current().record("view", &tracing::field::display(&view));

    HomeTemplate::new(&state, NotifyForm::new(view, FormState::default()))
}
