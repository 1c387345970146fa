use std::net::SocketAddr;
use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noteboard::app::router::build_router;
use noteboard::notes::store::{MemoryNoteStore, PgNoteStore};
use noteboard::users::store::{MemoryUserStore, PgUserStore};
use noteboard::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_dec = DecodingKey::from_secret(jwt_secret.as_bytes());

    let state = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let db = PgPoolOptions::new()
                .max_connections(10)
                .connect(&database_url)
                .await
                .expect("failed to connect to Postgres");
            sqlx::migrate!("./migrations")
                .run(&db)
                .await
                .expect("failed to run migrations");
            AppState {
                users: Arc::new(PgUserStore::new(db.clone())),
                notes: Arc::new(PgNoteStore::new(db)),
                jwt_dec,
            }
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, notes will not survive a restart");
            AppState {
                users: Arc::new(MemoryUserStore::new()),
                notes: Arc::new(MemoryNoteStore::new()),
                jwt_dec,
            }
        }
    };

    let app = build_router(state);
    let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
