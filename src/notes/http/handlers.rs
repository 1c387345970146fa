use axum::{Json, extract::State, http::StatusCode};
use futures::future::join_all;
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::auth_user::AuthUser,
    notes::store::NewNote,
};

use super::dto::{
    CreateNoteRequest, DeleteNoteRequest, MessageResponse, NoteView, UpdateNoteRequest,
};

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes with the owner's username attached", body = [NoteView]),
        (status = 400, description = "No notes found", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn get_all_notes(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Vec<NoteView>>)> {
    let notes = state.notes.find_all().await.map_err(ApiError::Store)?;

    if notes.is_empty() {
        return Err(ApiError::BadRequest("No notes found".to_string()));
    }

    // Owner lookups run concurrently; join_all hands the results back in
    // note order.
    let owners = join_all(notes.iter().map(|note| state.users.find_by_id(note.user))).await;
    let owners = owners
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::Store)?;

    let views = notes
        .into_iter()
        .zip(owners)
        .map(|(note, owner)| NoteView {
            id: note.id,
            user: note.user,
            title: note.title,
            text: note.text,
            completed: note.completed,
            username: owner.map(|u| u.username),
        })
        .collect();

    Ok((StatusCode::OK, Json(views)))
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = MessageResponse),
        (status = 400, description = "Missing fields or invalid note data", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 409, description = "Duplicate note title", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn create_note(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (Some(user), Some(title), Some(text)) = (
        required(&request.user),
        required(&request.title),
        required(&request.text),
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };
    let user = Uuid::parse_str(user)
        .map_err(|_| ApiError::BadRequest("Invalid note data received".to_string()))?;

    let duplicate = state
        .notes
        .find_by_title(title)
        .await
        .map_err(ApiError::Store)?;
    if duplicate.is_some() {
        return Err(ApiError::Conflict("Duplicate note title"));
    }

    let created = state
        .notes
        .create(NewNote {
            user,
            title: title.to_string(),
            text: text.to_string(),
        })
        .await
        .map_err(ApiError::Store)?;

    match created {
        Some(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "New note created".to_string(),
            }),
        )),
        None => Err(ApiError::BadRequest(
            "Invalid note data received".to_string(),
        )),
    }
}

#[utoipa::path(
    patch,
    path = "/notes",
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse),
        (status = 400, description = "Missing fields or note not found", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 409, description = "Duplicate note title", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn update_note(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (Some(id), Some(user), Some(title), Some(text)) = (
        required(&request.id),
        required(&request.user),
        required(&request.title),
        required(&request.text),
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };
    let Some(completed) = request.completed.as_ref().and_then(serde_json::Value::as_bool) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };
    let id = Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("Note not found".to_string()))?;
    let user = Uuid::parse_str(user)
        .map_err(|_| ApiError::BadRequest("Invalid note data received".to_string()))?;

    let mut note = state
        .notes
        .find_by_id(id)
        .await
        .map_err(ApiError::Store)?
        .ok_or_else(|| ApiError::BadRequest("Note not found".to_string()))?;

    // Renaming a note to its own current title stays allowed.
    let duplicate = state
        .notes
        .find_by_title(title)
        .await
        .map_err(ApiError::Store)?;
    if let Some(duplicate) = duplicate {
        if duplicate.id != id {
            return Err(ApiError::Conflict("Duplicate note title"));
        }
    }

    note.user = user;
    note.title = title.to_string();
    note.text = text.to_string();
    note.completed = completed;
    let updated = state.notes.save(note).await.map_err(ApiError::Store)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: format!("\"{}\" updated", updated.title),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/notes",
    request_body = DeleteNoteRequest,
    responses(
        (status = 200, description = "Confirmation embedding the deleted note's title and id", body = String),
        (status = 400, description = "Missing id or note not found", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn delete_note(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<DeleteNoteRequest>,
) -> ApiResult<(StatusCode, Json<String>)> {
    let Some(id) = required(&request.id) else {
        return Err(ApiError::BadRequest("Note ID required".to_string()));
    };
    let id = Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("Note not found".to_string()))?;

    let note = state
        .notes
        .find_by_id(id)
        .await
        .map_err(ApiError::Store)?
        .ok_or_else(|| ApiError::BadRequest("Note not found".to_string()))?;

    state.notes.delete(note.id).await.map_err(ApiError::Store)?;

    let reply = format!("Note titled \"{}\" with ID {} deleted", note.title, note.id);
    Ok((StatusCode::OK, Json(reply)))
}
