use axum::{routing::post, Router};
use rand::seq::IndexedRandom;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

mod login;
mod logout;
mod verify;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::login))
        .route("/verify", post(verify::verify))
        .route("/logout", post(logout::logout))
}

/// Accepts `+`, digits and common separators; yields `+<digits>`.
pub fn normalize_phone(phone: &str) -> AppResult<String> {
    let trimmed = phone.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut normalized = String::from("+");
    for c in digits.chars() {
        match c {
            '0'..='9' => normalized.push(c),
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return Err(AppError::validation("Phone number may only contain digits")),
        }
    }

    if !(7..=15).contains(&(normalized.len() - 1)) {
        return Err(AppError::validation("Phone number must have 7 to 15 digits"));
    }

    Ok(normalized)
}

fn random_name() -> String {
    let adjectives = [
        "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
        "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy",
        "Eager", "Fancy", "Rusty", "Golden", "Silver", "Bright", "Lucky",
    ];
    let nouns = [
        "Fox", "Bear", "Eagle", "Wolf", "Dragon", "Tiger", "Lion", "Owl", "Rabbit",
        "Falcon", "Hawk", "Panda", "Kitten", "Puppy", "Phoenix", "Griffin",
        "Turtle", "Dolphin", "Whale", "Elephant", "Giraffe", "Zebra",
    ];

    let mut rng = rand::rng();
    format!(
        "{} {}",
        adjectives.choose(&mut rng).unwrap_or(&"Quiet"),
        nouns.choose(&mut rng).unwrap_or(&"Otter"),
    )
}

pub async fn find_or_create_user(db_pool: &SqlitePool, phone: &str) -> AppResult<String> {
    let uuid = Uuid::now_v7();
    let name = random_name();

    let created = sqlx::query("INSERT INTO users (id,phone,name,created_at) VALUES (?,?,?,?) ON CONFLICT(phone) DO NOTHING")
        .bind(uuid.to_string())
        .bind(phone)
        .bind(&name)
        .bind(OffsetDateTime::now_utc())
        .execute(db_pool)
        .await?
        .rows_affected();

    if created > 0 {
        info!("adding u/{uuid} ({phone}), {name}");
        return Ok(uuid.to_string());
    }

    let (user_id,): (String,) = sqlx::query_as("SELECT id FROM users WHERE phone=?")
        .bind(phone)
        .fetch_one(db_pool)
        .await?;
    Ok(user_id)
}
