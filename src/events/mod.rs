mod new;
mod page;
mod subscribe;
mod update;

use std::collections::BTreeSet;

use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{AppResult, AppState};

pub use new::add_event;
pub use page::{get_event, list_events};
pub use subscribe::{i_go_subscribe_event, i_go_unsubscribe_event, subscribe_event, unsubscribe_event, Tier};
pub use update::update_event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub creator_id: String,
    pub name: String,
    pub description: Option<String>,
    pub picture_id: Option<String>,
    pub picture: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_start: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_end: Option<OffsetDateTime>,
    pub subscribers: BTreeSet<String>,
    pub i_go_subscribers: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub creator_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture_id: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_end: Option<OffsetDateTime>,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    creator_id: String,
    name: String,
    description: Option<String>,
    picture_id: Option<String>,
    picture: Option<String>,
    date_start: Option<OffsetDateTime>,
    date_end: Option<OffsetDateTime>,
}

impl EventRow {
    async fn with_subscribers(self, db_pool: &SqlitePool) -> AppResult<Event> {
        let rows: Vec<(String, Tier)> = sqlx::query_as("SELECT user_id,tier FROM event_subscriptions WHERE event_id=?")
            .bind(&self.id)
            .fetch_all(db_pool)
            .await?;

        let mut subscribers = BTreeSet::new();
        let mut i_go_subscribers = BTreeSet::new();
        for (user_id, tier) in rows {
            match tier {
                Tier::Subscriber => subscribers.insert(user_id),
                Tier::IGo => i_go_subscribers.insert(user_id),
            };
        }

        Ok(Event {
            id: self.id,
            creator_id: self.creator_id,
            name: self.name,
            description: self.description,
            picture_id: self.picture_id,
            picture: self.picture,
            date_start: self.date_start,
            date_end: self.date_end,
            subscribers,
            i_go_subscribers,
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(page::events))
        .route("/events/{id}", get(page::event))
}
