use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Receiver must be different than the current logged in user")]
    IllegalReceiver,

    #[error("Chat already exists")]
    ChatExists,

    #[error("Chat doesn't exist")]
    ChatNotExists,

    #[error("Method '{0}' not found")]
    MethodNotFound(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn code(&self) -> &'static str {
        use AppError::*;
        match self {
            Unauthorized(_) => "unauthorized",
            Validation(_) => "validation-error",
            IllegalReceiver => "illegal-receiver",
            ChatExists => "chat-exists",
            ChatNotExists => "chat-not-exists",
            MethodNotFound(_) => "method-not-found",
            NotFound(_) => "not-found",
            Internal(_) => "internal-error",
        }
    }

    pub fn status(&self) -> StatusCode {
        use AppError::*;
        match self {
            Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Validation(_) | IllegalReceiver => StatusCode::BAD_REQUEST,
            ChatExists => StatusCode::CONFLICT,
            ChatNotExists | MethodNotFound(_) | NotFound(_) => StatusCode::NOT_FOUND,
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reason = match &self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}\n{}", err.backtrace());
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({ "error": self.code(), "reason": reason })),
        )
            .into_response()
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(sqlx::Error);
apperr_impl!(tower_sessions::session::Error);
apperr_impl!(serde_json::Error);
