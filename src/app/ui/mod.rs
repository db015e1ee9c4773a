use axum::{
    routing::{get, post},
    Router,
};

use super::AppState;

mod home;
pub mod not_found;
mod notify;
mod template;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/subscribe", post(notify::notify))
}
