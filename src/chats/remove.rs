use sqlx::SqlitePool;
use tracing::info;

use crate::{check, session::Caller, AppError, AppResult};

/// Deletes a chat. Its messages are left in place.
pub async fn remove_chat(db_pool: &SqlitePool, caller: &Caller, chat_id: &str) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to remove chat")?;

    check::non_empty("chatId", chat_id)?;

    let removed = sqlx::query("DELETE FROM chats WHERE id=?")
        .bind(chat_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if removed == 0 {
        return Err(AppError::ChatNotExists);
    }

    info!("chat {chat_id} removed by {user_id}");
    Ok(())
}
