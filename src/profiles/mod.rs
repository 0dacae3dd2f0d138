mod page;
mod update;

use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub use page::get_profile;
pub use update::update_profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub profile: Profile,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles/{id}", get(page::profile))
}
