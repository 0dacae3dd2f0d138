use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{check, session::Caller, AppResult};

use super::EventInput;

/// Creates an event. When the declared creator is not the caller nothing
/// is stored and no error is raised.
pub async fn add_event(db_pool: &SqlitePool, caller: &Caller, event: EventInput) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to create a new event")?;

    check::non_empty("creatorId", &event.creator_id)?;
    check::non_empty("name", &event.name)?;

    if event.creator_id != user_id {
        debug!("addEvent ignored: {user_id} is not creator {}", event.creator_id);
        return Ok(());
    }

    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO events (id,creator_id,name,description,picture_id,picture,date_start,date_end,created_at)
        VALUES (?,?,?,?,?,?,?,?,?)"
    )
        .bind(id.to_string())
        .bind(&event.creator_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.picture_id)
        .bind(&event.picture)
        .bind(event.date_start)
        .bind(event.date_end)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?;

    info!("event {id} '{}' created by {user_id}", event.name);
    Ok(())
}
