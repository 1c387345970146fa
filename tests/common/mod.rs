#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, encode};
use noteboard::notes::store::{MemoryNoteStore, NewNote, Note, NoteStore};
use noteboard::users::store::{MemoryUserStore, User};
use noteboard::{AppState, app::router::build_router};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

/// Wraps the real router around in-memory stores the tests can reach into
/// directly for seeding and inspection.
pub struct TestApp {
    app: Router,
    pub users: MemoryUserStore,
    pub notes: MemoryNoteStore,
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Mints a bearer token for the given user id. Token issuance is outside
/// the service, so tests sign their own.
pub fn bearer_for(user_id: Uuid) -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 60 * 30,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token")
}

impl TestApp {
    pub fn new() -> Self {
        let users = MemoryUserStore::new();
        let notes = MemoryNoteStore::new();
        let state = AppState {
            users: Arc::new(users.clone()),
            notes: Arc::new(notes.clone()),
            jwt_dec: DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        };

        Self {
            app: build_router(state),
            users,
            notes,
        }
    }

    pub fn seed_user(&self, username: &str) -> User {
        self.users.insert(username)
    }

    pub async fn seed_note(&self, user: Uuid, title: &str, text: &str) -> Note {
        self.notes
            .create(NewNote {
                user,
                title: title.to_string(),
                text: text.to_string(),
            })
            .await
            .expect("memory store create cannot fail")
            .expect("memory store always returns the created note")
    }

    pub async fn get_json(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::GET, path, None, bearer).await
    }

    pub async fn get_text(&self, path: &str, bearer: Option<&str>) -> (StatusCode, String) {
        let (status, bytes) = self.request(Method::GET, path, None, bearer).await;
        let text = String::from_utf8(bytes).expect("response is not valid utf-8 text");
        (status, text)
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, Some(body), bearer)
            .await
    }

    pub async fn patch_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::PATCH, path, Some(body), bearer)
            .await
    }

    pub async fn delete_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::DELETE, path, Some(body), bearer)
            .await
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, path, body, bearer).await;

        if bytes.is_empty() {
            return (status, Value::Null);
        }

        let value = serde_json::from_slice(&bytes).expect("response is not valid json");
        (status, value)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req_builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            req_builder = req_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("failed to serialize request body"))
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        (status, bytes.to_vec())
    }
}
