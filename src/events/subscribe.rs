use sqlx::SqlitePool;

use crate::{check, session::Caller, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum Tier {
    #[sqlx(rename = "subscriber")]
    Subscriber,
    #[sqlx(rename = "igo")]
    IGo,
}

const REASON: &str = "User must be logged-in to subscribe";

async fn join(db_pool: &SqlitePool, caller: &Caller, event_id: &str, tier: Tier) -> AppResult<()> {
    let user_id = caller.require(REASON)?;

    check::non_empty("eventId", event_id)?;

    // unknown events are left alone, like an update matching no document
    sqlx::query(
        "INSERT OR IGNORE INTO event_subscriptions (event_id,user_id,tier)
        SELECT ?,?,? WHERE EXISTS (SELECT 1 FROM events WHERE id=?)"
    )
        .bind(event_id)
        .bind(user_id)
        .bind(tier)
        .bind(event_id)
        .execute(db_pool)
        .await?;

    Ok(())
}

pub async fn subscribe_event(db_pool: &SqlitePool, caller: &Caller, event_id: &str) -> AppResult<()> {
    join(db_pool, caller, event_id, Tier::Subscriber).await
}

pub async fn i_go_subscribe_event(db_pool: &SqlitePool, caller: &Caller, event_id: &str) -> AppResult<()> {
    join(db_pool, caller, event_id, Tier::IGo).await
}

/// Leaves the event entirely: both tiers are dropped.
pub async fn unsubscribe_event(db_pool: &SqlitePool, caller: &Caller, event_id: &str) -> AppResult<()> {
    let user_id = caller.require(REASON)?;

    check::non_empty("eventId", event_id)?;

    sqlx::query("DELETE FROM event_subscriptions WHERE event_id=? AND user_id=?")
        .bind(event_id)
        .bind(user_id)
        .execute(db_pool)
        .await?;

    Ok(())
}

pub async fn i_go_unsubscribe_event(db_pool: &SqlitePool, caller: &Caller, event_id: &str) -> AppResult<()> {
    let user_id = caller.require(REASON)?;

    check::non_empty("eventId", event_id)?;

    sqlx::query("DELETE FROM event_subscriptions WHERE event_id=? AND user_id=? AND tier=?")
        .bind(event_id)
        .bind(user_id)
        .bind(Tier::IGo)
        .execute(db_pool)
        .await?;

    Ok(())
}
