use sqlx::SqlitePool;
use tracing::debug;

use crate::{check, session::Caller, AppResult};

use super::EventInput;

/// Silently does nothing unless the caller is both the declared and the stored creator.
pub async fn update_event(db_pool: &SqlitePool, caller: &Caller, event: EventInput) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to update event")?;

    check::non_empty("name", &event.name)?;

    if event.creator_id != user_id {
        debug!("updateEvent ignored: {user_id} is not creator {}", event.creator_id);
        return Ok(());
    }

    let Some(event_id) = event.id.as_deref() else {
        debug!("updateEvent ignored: no event id");
        return Ok(());
    };

    let updated = sqlx::query(
        "UPDATE events SET name=?,description=?,picture_id=?,picture=?,date_start=?,date_end=?
        WHERE id=? AND creator_id=?"
    )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.picture_id)
        .bind(&event.picture)
        .bind(event.date_start)
        .bind(event.date_end)
        .bind(event_id)
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if updated == 0 {
        debug!("updateEvent matched nothing for {event_id} by {user_id}");
    }

    Ok(())
}
