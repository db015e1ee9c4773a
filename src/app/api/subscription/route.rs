use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::schema::{SubscribeBody, SubscribeParams, SubscribeResponse};
use crate::{
    app::{error::AppResult, submit_to_completion, AppState},
    submission::Submitter,
};

/// JSON flavour of the notify form. With `?view=<id>` it drives that page
/// view's form; without, every call is a one-off attempt.
#[tracing::instrument(name = "Subscribe via api", skip(state, body), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Query(params): Query<SubscribeParams>,
    Json(body): Json<SubscribeBody>,
) -> AppResult<Json<SubscribeResponse>> {
    let submitter = match params.view {
        Some(view) => state.page_views.get_or_open(view),
        None => Arc::new(Submitter::new(state.notifier.clone())),
    };

    let message = submit_to_completion(submitter, body.email).await?;

    Ok(Json(SubscribeResponse {
        status: "success",
        message,
    }))
}
