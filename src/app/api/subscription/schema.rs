use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SubscribeBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeParams {
    pub view: Option<Uuid>,
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub status: &'static str,
    pub message: String,
}
