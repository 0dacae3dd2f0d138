use axum::{
    body::Bytes,
    debug_handler,
    extract::{DefaultBodyLimit, Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{session::Caller, AppError, AppResult, AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPicture {
    pub picture_id: String,
    pub url: String,
}

pub async fn store_picture(
    db_pool: &SqlitePool,
    caller: &Caller,
    content_type: &str,
    bytes: &[u8],
) -> AppResult<StoredPicture> {
    let user_id = caller.require("User must be logged-in to upload pictures")?;

    if !content_type.starts_with("image/") {
        return Err(AppError::validation("Pictures must have an image/* content type"));
    }
    if bytes.is_empty() {
        return Err(AppError::validation("Picture is empty"));
    }

    let id = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO pictures (id,owner_id,content_type,bytes,created_at) VALUES (?,?,?,?,?)")
        .bind(&id)
        .bind(user_id)
        .bind(content_type)
        .bind(bytes)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?;

    Ok(StoredPicture {
        url: format!("/pictures/{id}"),
        picture_id: id,
    })
}

pub async fn load_picture(db_pool: &SqlitePool, picture_id: &str) -> AppResult<(String, Vec<u8>)> {
    sqlx::query_as("SELECT content_type,bytes FROM pictures WHERE id=?")
        .bind(picture_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or(AppError::NotFound("picture"))
}

#[debug_handler(state = AppState)]
async fn upload(
    State(db_pool): State<SqlitePool>,
    caller: Caller,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<StoredPicture>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    Ok(Json(store_picture(&db_pool, &caller, content_type, &body).await?))
}

#[debug_handler(state = AppState)]
async fn picture(
    Path(picture_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let (content_type, bytes) = load_picture(&db_pool, &picture_id).await?;
    Ok(([(CONTENT_TYPE, content_type)], bytes).into_response())
}

pub fn router(max_picture_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/pictures", post(upload).layer(DefaultBodyLimit::max(max_picture_bytes)))
        .route("/pictures/{id}", get(picture))
}
