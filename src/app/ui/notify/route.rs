use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use uuid::Uuid;

use super::schema::NotifyFormBody;
use crate::app::{
    error::{AppError, AppResult},
    submit_to_completion,
    ui::template::{HomeTemplate, NotifyForm, NotifyTemplate},
    AppState,
};

/// Submits the notify form of one page view.
///
/// htmx requests get the form fragment back, plain form posts get the whole
/// page. Validation and delivery failures are part of the rendered form; only
/// a submission made while the previous one is still sending is answered with
/// 409.
#[tracing::instrument(
    name = "Notify form submission",
    skip(state, headers, body),
    fields(email = %body.email, view = tracing::field::Empty)
)]
pub async fn notify(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(body): Form<NotifyFormBody>,
) -> AppResult<Response> {
    let view = body.view.unwrap_or_else(Uuid::new_v4);
    tracing::Span::current().record("view", &tracing::field::display(&view));

    let submitter = state.page_views.get_or_open(view);
    let status = match submit_to_completion(submitter.clone(), body.email).await {
        Ok(_) | Err(AppError::ValidationError(_)) | Err(AppError::DeliveryError(_)) => {
            StatusCode::OK
        }
        Err(AppError::Conflict(_)) => StatusCode::CONFLICT,
        Err(e) => return Err(e),
    };

    let form = NotifyForm::new(view, submitter.state());
    if headers.contains_key("hx-request") {
        Ok((status, NotifyTemplate { form }).into_response())
    } else {
        Ok((status, HomeTemplate::new(&state, form)).into_response())
    }
}
