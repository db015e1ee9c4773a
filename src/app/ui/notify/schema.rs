use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct NotifyFormBody {
    pub view: Option<Uuid>,
    pub email: String,
}
