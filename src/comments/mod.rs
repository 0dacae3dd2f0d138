mod delete;
mod new;

use axum::{debug_handler, extract::{Path, State}, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{session::Caller, AppResult, AppState};

pub use delete::delete_comment;
pub use new::add_comment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub creator_id: String,
    pub doc_id: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub doc_id: String,
}

pub async fn count_comments(db_pool: &SqlitePool, event_id: &str) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE doc_id=?")
        .bind(event_id)
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

pub async fn list_comments(db_pool: &SqlitePool, event_id: &str) -> AppResult<Vec<Comment>> {
    Ok(
        sqlx::query_as("SELECT id,creator_id,doc_id,text,created_at FROM comments WHERE doc_id=? ORDER BY created_at, id")
            .bind(event_id)
            .fetch_all(db_pool)
            .await?
    )
}

#[debug_handler(state = AppState)]
async fn comments(
    Path(event_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<Vec<Comment>>> {
    caller.require("User must be logged-in to read comments")?;
    Ok(Json(list_comments(&db_pool, &event_id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/comments", get(comments))
}
