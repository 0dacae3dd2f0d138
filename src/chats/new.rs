use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{check, session::Caller, AppError, AppResult};

// the pair is unique through idx_chats_pair; the insert alone decides ChatExists
pub async fn add_chat(db_pool: &SqlitePool, caller: &Caller, receiver_id: &str) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to create a new chat")?;

    check::non_empty("receiverId", receiver_id)?;

    if receiver_id == user_id {
        return Err(AppError::IllegalReceiver);
    }

    let id = Uuid::now_v7();
    let inserted = sqlx::query("INSERT INTO chats (id,first_member,second_member,created_at) VALUES (?,?,?,?) ON CONFLICT DO NOTHING")
        .bind(id.to_string())
        .bind(user_id)
        .bind(receiver_id)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?
        .rows_affected();

    if inserted == 0 {
        return Err(AppError::ChatExists);
    }

    info!("chat {id} opened by {user_id} with {receiver_id}");
    Ok(())
}
