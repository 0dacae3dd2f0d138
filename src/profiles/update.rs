use sqlx::SqlitePool;

use crate::{check, session::Caller, AppResult};

use super::Profile;

pub async fn update_profile(db_pool: &SqlitePool, caller: &Caller, profile: Profile) -> AppResult<()> {
    let user_id = caller.require("User must be logged-in to update profile")?;

    check::non_empty("name", &profile.name)?;
    check::maybe_non_empty("pictureId", profile.picture_id.as_deref())?;
    check::maybe_non_empty("description", profile.description.as_deref())?;

    sqlx::query("UPDATE users SET name=?,picture_id=?,description=? WHERE id=?")
        .bind(&profile.name)
        .bind(&profile.picture_id)
        .bind(&profile.description)
        .bind(user_id)
        .execute(db_pool)
        .await?;

    Ok(())
}
