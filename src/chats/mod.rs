mod msg;
mod new;
mod remove;
mod room;
mod ws;

use axum::{routing::get, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{AppResult, AppState};

pub use msg::{add_message, count_messages, list_messages, Message, MessageType, NewMessageId};
pub use new::add_chat;
pub use remove::remove_chat;
pub use room::list_chats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub member_ids: [String; 2],
}

pub(crate) async fn is_member(db_pool: &SqlitePool, chat_id: &str, user_id: &str) -> AppResult<bool> {
    Ok(
        sqlx::query("SELECT 1 FROM chats WHERE id=? AND (first_member=? OR second_member=?)")
            .bind(chat_id)
            .bind(user_id)
            .bind(user_id)
            .fetch_optional(db_pool)
            .await?
            .is_some()
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", get(room::my_chats))
        .route("/chats/{id}/messages", get(msg::messages))
        .route("/chats/{id}/ws", get(ws::chat_ws))
}
