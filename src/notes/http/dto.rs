use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fields arrive as options so that missing or empty values surface as the
/// service's own 400 reply instead of a deserialization rejection.
#[derive(Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Accepted only when it is a JSON boolean; `"true"` or `1` count as
    /// missing.
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub completed: Option<serde_json::Value>,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteNoteRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// A note as listed: the stored fields plus the owner's username. The
/// username is left out entirely when the owning user no longer exists.
#[derive(Serialize, ToSchema)]
pub struct NoteView {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub text: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
