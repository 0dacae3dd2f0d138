use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_idle_minutes: i64,
    /// Handed to the client for its map widget.
    pub maps_api_key: Option<String>,
    pub max_picture_bytes: usize,
    /// Dev only: return phone verification codes in the login response.
    pub echo_verification_codes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://gatherchat.db".to_owned(),
            bind_addr: "0.0.0.0:8080".to_owned(),
            session_idle_minutes: 60,
            maps_api_key: None,
            max_picture_bytes: 2 * 1024 * 1024,
            echo_verification_codes: false,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();

        Ok(Self {
            database_url: try_load("DATABASE_URL", defaults.database_url)?,
            bind_addr: try_load("BIND_ADDR", defaults.bind_addr)?,
            session_idle_minutes: try_load("SESSION_IDLE_MINUTES", defaults.session_idle_minutes)?,
            maps_api_key: env::var("MAPS_API_KEY").ok().filter(|key| !key.is_empty()),
            max_picture_bytes: try_load("MAX_PICTURE_BYTES", defaults.max_picture_bytes)?,
            echo_verification_codes: try_load("ECHO_VERIFICATION_CODES", defaults.echo_verification_codes)?,
        })
    }
}

fn try_load<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid {key} value '{value}'")),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
