use sqlx::SqlitePool;
use tracing::debug;

use crate::{check, session::Caller, AppResult};

/// Deletes a comment. Does nothing, and raises nothing, unless the caller
/// is the named creator; the stored creator must match as well.
pub async fn delete_comment(
    db_pool: &SqlitePool,
    caller: &Caller,
    comment_id: &str,
    creator_id: &str,
) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to delete comment")?;

    check::non_empty("commentId", comment_id)?;
    check::non_empty("commentCreatorId", creator_id)?;

    if creator_id != user_id {
        debug!("deleteComment ignored: {user_id} is not creator {creator_id}");
        return Ok(());
    }

    sqlx::query("DELETE FROM comments WHERE id=? AND creator_id=?")
        .bind(comment_id)
        .bind(user_id)
        .execute(db_pool)
        .await?;

    Ok(())
}
