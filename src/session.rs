use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::{AppError, AppResult};

pub const USER_ID: &str = "user_id";
pub const PENDING_PHONE: &str = "pending_phone";
pub const VERIFICATION_CODE: &str = "verification_code";
pub const VERIFY_ATTEMPTS: &str = "verify_attempts";
pub const LOGIN_REQUESTS: &str = "login_requests";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    user_id: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()) }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn require(&self, reason: &'static str) -> AppResult<&str> {
        self.user_id().ok_or(AppError::Unauthorized(reason))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow!(msg)))?;

        Ok(Caller {
            user_id: session.get::<String>(USER_ID).await?,
        })
    }
}
