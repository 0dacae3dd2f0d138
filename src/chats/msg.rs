use axum::{debug_handler, extract::{Path, State}, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{check, session::Caller, AppError, AppResult};

use super::is_member;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: MessageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageId {
    pub message_id: String,
}

pub async fn add_message(
    db_pool: &SqlitePool,
    tx: &broadcast::Sender<Message>,
    caller: &Caller,

    kind: MessageType,
    chat_id: &str,
    content: &str,
) -> AppResult<NewMessageId> {
    let user_id = caller.require("User must be logged-in to send a message")?;

    check::non_empty("chatId", chat_id)?;
    check::non_empty("content", content)?;

    let message = Message {
        id: Uuid::now_v7().to_string(),
        chat_id: chat_id.to_owned(),
        sender_id: user_id.to_owned(),
        content: content.to_owned(),
        created_at: OffsetDateTime::now_utc(),
        kind,
    };

    let inserted = sqlx::query(
        "INSERT INTO messages (id,chat_id,sender_id,content,type,created_at)
        SELECT ?,?,?,?,?,? WHERE EXISTS (SELECT 1 FROM chats WHERE id=?)"
    )
        .bind(&message.id)
        .bind(&message.chat_id)
        .bind(&message.sender_id)
        .bind(&message.content)
        .bind(message.kind)
        .bind(message.created_at)
        .bind(chat_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if inserted == 0 {
        return Err(AppError::ChatNotExists);
    }

    let message_id = message.id.clone();
    // nobody listening is fine
    let _ = tx.send(message);

    Ok(NewMessageId { message_id })
}

pub async fn count_messages(db_pool: &SqlitePool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

/// Oldest first. Non-members get `NotFound`.
pub async fn list_messages(db_pool: &SqlitePool, caller: &Caller, chat_id: &str) -> AppResult<Vec<Message>> {
    let user_id = caller.require("User must be logged-in to read messages")?;

    if !is_member(db_pool, chat_id, user_id).await? {
        return Err(AppError::NotFound("chat"));
    }

    Ok(
        sqlx::query_as("SELECT id,chat_id,sender_id,content,type,created_at FROM messages WHERE chat_id=? ORDER BY created_at, id")
            .bind(chat_id)
            .fetch_all(db_pool)
            .await?
    )
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn messages(
    Path(chat_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(list_messages(&db_pool, &caller, &chat_id).await?))
}
