use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::store::{StoreError, collation_fold};

#[derive(Debug, Clone)]
pub struct Note {
    pub id: Uuid,
    /// Owning user's id. A reference, not a containment: the user row may
    /// be gone while the note lives on.
    pub user: Uuid,
    pub title: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub user: Uuid,
    pub title: String,
    pub text: String,
}

/// Persistence contract for the note collection.
///
/// Titles are unique only under the collated comparison performed by
/// `find_by_title`, and only because the handlers check before writing.
/// Neither backend enforces it; two concurrent creates can both pass the
/// check and both land.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Looks up a note whose title matches case- and accent-insensitively.
    async fn find_by_title(&self, title: &str) -> Result<Option<Note>, StoreError>;

    /// Inserts with `completed = false` and a store-assigned id. `None`
    /// means the backend reported no inserted row.
    async fn create(&self, new_note: NewNote) -> Result<Option<Note>, StoreError>;

    /// Persists the full state of an existing note.
    async fn save(&self, note: Note) -> Result<Note, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn note_from_row(row: &PgRow) -> Note {
    Note {
        id: row.get("id"),
        user: row.get("user_id"),
        title: row.get("title"),
        text: row.get("text"),
        completed: row.get("completed"),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, text, completed FROM notes ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let row = sqlx::query("SELECT id, user_id, title, text, completed FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Note>, StoreError> {
        let row = sqlx::query(
            "SELECT id, user_id, title, text, completed FROM notes \
             WHERE lower(unaccent(title)) = lower(unaccent($1)) LIMIT 1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn create(&self, new_note: NewNote) -> Result<Option<Note>, StoreError> {
        let row = sqlx::query(
            "INSERT INTO notes (user_id, title, text) VALUES ($1, $2, $3) \
             RETURNING id, user_id, title, text, completed",
        )
        .bind(new_note.user)
        .bind(&new_note.title)
        .bind(&new_note.text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn save(&self, note: Note) -> Result<Note, StoreError> {
        let row = sqlx::query(
            "UPDATE notes SET user_id = $2, title = $3, text = $4, completed = $5 \
             WHERE id = $1 RETURNING id, user_id, title, text, completed",
        )
        .bind(note.id)
        .bind(note.user)
        .bind(&note.title)
        .bind(&note.text)
        .bind(note.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(note_from_row(&row))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-memory NoteStore for tests and running without a database. Insertion
/// order is the natural order `find_all` reports.
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Note>, StoreError> {
        let folded = collation_fold(title);
        let notes = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .find(|n| collation_fold(&n.title) == folded)
            .cloned())
    }

    async fn create(&self, new_note: NewNote) -> Result<Option<Note>, StoreError> {
        let note = Note {
            id: Uuid::new_v4(),
            user: new_note.user,
            title: new_note.title,
            text: new_note.text,
            completed: false,
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(Some(note))
    }

    async fn save(&self, note: Note) -> Result<Note, StoreError> {
        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => *slot = note.clone(),
            None => notes.push(note.clone()),
        }
        Ok(note)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.notes.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }
}
