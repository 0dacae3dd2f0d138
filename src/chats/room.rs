use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{session::Caller, AppResult};

use super::Chat;

pub async fn list_chats(db_pool: &SqlitePool, caller: &Caller) -> AppResult<Vec<Chat>> {
    let user_id = caller.require("User must be logged-in to list chats")?;

    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT id,first_member,second_member FROM chats WHERE first_member=? OR second_member=? ORDER BY created_at")
            .bind(user_id)
            .bind(user_id)
            .fetch_all(db_pool)
            .await?;

    Ok(
        rows.into_iter()
            .map(|(id, first, second)| Chat { id, member_ids: [first, second] })
            .collect()
    )
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn my_chats(
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<Vec<Chat>>> {
    Ok(Json(list_chats(&db_pool, &caller).await?))
}
