use axum::{debug_handler, extract::{Path, State}, Json};
use sqlx::SqlitePool;

use crate::{session::Caller, AppError, AppResult};

use super::{Profile, PublicUser};

pub async fn get_profile(db_pool: &SqlitePool, user_id: &str) -> AppResult<PublicUser> {
    let Some((name, picture_id, description)): Option<(String, Option<String>, Option<String>)> =
        sqlx::query_as("SELECT name,picture_id,description FROM users WHERE id=?")
            .bind(user_id)
            .fetch_optional(db_pool)
            .await?
    else {
        return Err(AppError::NotFound("profile"));
    };

    Ok(PublicUser {
        id: user_id.to_owned(),
        profile: Profile { name, picture_id, description },
    })
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn profile(
    Path(user_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    caller: Caller,
) -> AppResult<Json<PublicUser>> {
    caller.require("User must be logged-in to view profiles")?;
    Ok(Json(get_profile(&db_pool, &user_id).await?))
}
