use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        phone TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        picture_id TEXT,
        description TEXT,
        created_at TEXT NOT NULL
    )",
    // member order is kept as created; uniqueness is over the unordered pair
    "CREATE TABLE IF NOT EXISTS chats (
        id TEXT PRIMARY KEY NOT NULL,
        first_member TEXT NOT NULL,
        second_member TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_chats_pair
        ON chats(min(first_member, second_member), max(first_member, second_member))",
    // no foreign key on chat_id: removing a chat leaves its messages
    "CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY NOT NULL,
        chat_id TEXT NOT NULL,
        sender_id TEXT NOT NULL,
        content TEXT NOT NULL,
        type TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_messages_chat ON messages(chat_id, created_at)",
    "CREATE TABLE IF NOT EXISTS events (
        id TEXT PRIMARY KEY NOT NULL,
        creator_id TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        picture_id TEXT,
        picture TEXT,
        date_start TEXT,
        date_end TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS event_subscriptions (
        event_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        tier TEXT NOT NULL,
        PRIMARY KEY (event_id, user_id, tier)
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id TEXT PRIMARY KEY NOT NULL,
        creator_id TEXT NOT NULL,
        doc_id TEXT NOT NULL,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_doc ON comments(doc_id, created_at)",
    "CREATE TABLE IF NOT EXISTS pictures (
        id TEXT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        content_type TEXT NOT NULL,
        bytes BLOB NOT NULL,
        created_at TEXT NOT NULL
    )",
];

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("bad DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let db_pool = pool_options(database_url)
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {database_url}"))?;

    initialize(&db_pool).await?;
    Ok(db_pool)
}

// every connection to :memory: is its own database, so that pool holds
// exactly one connection and never lets it go
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(16)
    }
}

pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    connect("sqlite::memory:").await
}

pub async fn initialize(db_pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(db_pool)
            .await
            .with_context(|| format!("schema creation failed: {statement}"))?;
    }

    info!("schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
