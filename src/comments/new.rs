use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::{check, session::Caller, AppResult};

use super::CommentInput;

/// Stores a comment on an event. A comment claiming someone else as its
/// creator is dropped without an error.
pub async fn add_comment(db_pool: &SqlitePool, caller: &Caller, comment: CommentInput) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to create a new comment")?;

    check::non_empty("creatorId", &comment.creator_id)?;
    check::non_empty("text", &comment.text)?;
    check::non_empty("docId", &comment.doc_id)?;

    if comment.creator_id != user_id {
        debug!("addComment ignored: {user_id} is not creator {}", comment.creator_id);
        return Ok(());
    }

    sqlx::query("INSERT INTO comments (id,creator_id,doc_id,text,created_at) VALUES (?,?,?,?,?)")
        .bind(Uuid::now_v7().to_string())
        .bind(&comment.creator_id)
        .bind(&comment.doc_id)
        .bind(&comment.text)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?;

    Ok(())
}
