use axum::{routing::post, Router};

use crate::app::AppState;

mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/subscribe", post(route::subscribe))
}
