use axum::{Router, routing::get};

use crate::AppState;
mod dto;
pub(crate) mod handlers;

pub use dto::{
    CreateNoteRequest, DeleteNoteRequest, MessageResponse, NoteView, UpdateNoteRequest,
};
pub use handlers::{create_note, delete_note, get_all_notes, update_note};

/// All four verbs live on the collection path; update and delete carry the
/// note id in the request body.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_all_notes)
            .post(create_note)
            .patch(update_note)
            .delete(delete_note),
    )
}
