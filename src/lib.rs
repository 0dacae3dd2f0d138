pub mod appresult;
pub mod auth;
pub mod chats;
pub mod check;
pub mod comments;
pub mod config;
pub mod db;
pub mod events;
pub mod methods;
pub mod pictures;
pub mod profiles;
pub mod session;
pub mod shell;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use chats::Message;
pub use config::Config;
pub use session::Caller;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tx: broadcast::Sender<Message>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        Self {
            db_pool,
            tx: broadcast::channel(256).0,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(state.config.session_idle_minutes)));

    Router::new()
        .merge(methods::router())
        .merge(auth::router())
        .merge(chats::router())
        .merge(events::router())
        .merge(comments::router())
        .merge(profiles::router())
        .merge(pictures::router(state.config.max_picture_bytes))
        .merge(shell::router())

        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::very_permissive())
}
