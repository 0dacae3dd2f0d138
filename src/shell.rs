//! What the mobile client needs to know before rendering anything.

use std::sync::Arc;

use axum::{debug_handler, extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{config::Config, methods::CATALOG, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub maps_api_key: Option<String>,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub name: &'static str,
    pub requires_login: bool,
}

pub fn client_config(config: &Config) -> ClientConfig {
    ClientConfig {
        maps_api_key: config.maps_api_key.clone(),
        methods: CATALOG
            .iter()
            .map(|spec| MethodInfo { name: spec.name, requires_login: spec.requires_login })
            .collect(),
    }
}

#[debug_handler(state = AppState)]
async fn config(State(config): State<Arc<Config>>) -> Json<ClientConfig> {
    Json(client_config(&config))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/client-config", get(config))
}
