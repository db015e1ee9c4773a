use axum::Router;

use super::AppState;

mod subscription;

pub fn router() -> Router<AppState> {
    subscription::router()
}
