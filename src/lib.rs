use std::sync::Arc;

use jsonwebtoken::DecodingKey;

use crate::notes::store::NoteStore;
use crate::users::store::UserStore;

pub mod app;
pub mod core;
pub mod error;
mod extractors;
pub mod notes;
pub mod store;
pub mod users;

/// Shared handler state. Stores are injected behind trait objects so the
/// same router runs against Postgres in production and the in-memory
/// backend in tests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub notes: Arc<dyn NoteStore>,
    pub jwt_dec: DecodingKey,
}
