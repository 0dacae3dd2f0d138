use axum::{debug_handler, extract::{Path, State}, Json};
use sqlx::SqlitePool;

use crate::{session::Caller, AppError, AppResult};

use super::{Event, EventRow};

const COLUMNS: &str = "id,creator_id,name,description,picture_id,picture,date_start,date_end";

pub async fn list_events(db_pool: &SqlitePool) -> AppResult<Vec<Event>> {
    let rows: Vec<EventRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM events ORDER BY created_at"))
        .fetch_all(db_pool)
        .await?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        events.push(row.with_subscribers(db_pool).await?);
    }
    Ok(events)
}

pub async fn get_event(db_pool: &SqlitePool, event_id: &str) -> AppResult<Event> {
    let row: Option<EventRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM events WHERE id=?"))
        .bind(event_id)
        .fetch_optional(db_pool)
        .await?;

    row.ok_or(AppError::NotFound("event"))?
        .with_subscribers(db_pool)
        .await
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn events(
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<Vec<Event>>> {
    caller.require("User must be logged-in to browse events")?;
    Ok(Json(list_events(&db_pool).await?))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn event(
    Path(event_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<Event>> {
    caller.require("User must be logged-in to browse events")?;
    Ok(Json(get_event(&db_pool, &event_id).await?))
}
