use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    session::{LOGIN_REQUESTS, PENDING_PHONE, USER_ID, VERIFICATION_CODE, VERIFY_ATTEMPTS},
    AppError, AppResult,
};

use super::find_or_create_user;

const MAX_ATTEMPTS: u32 = 5;

#[derive(Deserialize)]
pub(crate) struct VerifyForm {
    pub(crate) code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyReply {
    user_id: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn verify(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(VerifyForm { code }): Json<VerifyForm>,
) -> AppResult<Json<VerifyReply>> {
    let Some(phone) = session.get::<String>(PENDING_PHONE).await? else {
        return Err(AppError::validation("No login in progress"));
    };

    let attempts = session.get::<u32>(VERIFY_ATTEMPTS).await?.unwrap_or(0);
    if attempts >= MAX_ATTEMPTS {
        forget_pending(&session).await?;
        warn!("too many verification attempts for {phone}");
        return Err(AppError::validation("Too many attempts, request a new code"));
    }

    let stored_code = session.get::<String>(VERIFICATION_CODE).await?;
    if stored_code.as_deref() != Some(code.trim()) {
        session.insert(VERIFY_ATTEMPTS, attempts + 1).await?;
        return Err(AppError::validation("Invalid verification code"));
    }

    forget_pending(&session).await?;
    session.remove_value(LOGIN_REQUESTS).await?;

    let user_id = find_or_create_user(&db_pool, &phone).await?;
    session.cycle_id().await?;
    session.insert(USER_ID, &user_id).await?;

    info!("welcome u/{user_id}");
    Ok(Json(VerifyReply { user_id }))
}

async fn forget_pending(session: &Session) -> AppResult<()> {
    session.remove_value(PENDING_PHONE).await?;
    session.remove_value(VERIFICATION_CODE).await?;
    session.remove_value(VERIFY_ATTEMPTS).await?;
    Ok(())
}
