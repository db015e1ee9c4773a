use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::submission::SubmitError;

mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// A common error type that can be used throughout the API.
///
/// Maps each failure of a submission to a status code and a JSON body. The
/// message is the same text the form would show.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    DeliveryError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::InFlight => Self::Conflict(SubmitError::InFlight.to_string()),
            SubmitError::InvalidEmail(message) => Self::ValidationError(message),
            SubmitError::Delivery(e) => Self::DeliveryError(e.user_message()),
        }
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DeliveryError(_) => StatusCode::BAD_GATEWAY,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::ValidationError(ref message) => schema::Error {
                code: status.as_u16(),
                message: message.to_owned(),
                details: Some(vec![schema::ErrorDetails {
                    field: "email".to_owned(),
                    message: message.to_owned(),
                }]),
            },
            Self::Conflict(ref message) | Self::DeliveryError(ref message) => {
                tracing::warn!("{}", message);
                schema::Error {
                    code: status.as_u16(),
                    message: message.to_owned(),
                    details: None,
                }
            }
            Self::UnexpectedError(ref e) => {
                tracing::error!("{:?}", e);
                schema::Error {
                    code: status.as_u16(),
                    message: "Unexpected error".to_owned(),
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
