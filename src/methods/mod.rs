//! The remote procedure surface.
//!
//! A call is `{"method": "<name>", "params": [...]}`, answered with
//! `{"result": ...}` or an error body. Checks run in a fixed order:
//! unknown method, then identity, then parameter shape, then whatever the
//! operation itself checks.

mod call;

use axum::{body::Bytes, debug_handler, extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{session::Caller, AppError, AppResult, AppState};

pub use call::MethodCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: &'static str,
    pub requires_login: bool,
}

const fn login(name: &'static str) -> MethodSpec {
    MethodSpec { name, requires_login: true }
}

const fn public(name: &'static str) -> MethodSpec {
    MethodSpec { name, requires_login: false }
}

pub const CATALOG: &[MethodSpec] = &[
    login("addChat"),
    login("removeChat"),
    login("updateProfile"),
    login("addMessage"),
    public("countMessages"),
    login("addEvent"),
    login("updateEvent"),
    login("addComment"),
    login("deleteComment"),
    public("countComments"),
    login("subscribeEvent"),
    login("unsubscribeEvent"),
    login("iGoSubscribeEvent"),
    login("iGoUnsubscribeEvent"),
];

pub fn lookup(method: &str) -> Option<&'static MethodSpec> {
    CATALOG.iter().find(|spec| spec.name == method)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCall {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RawCall {
    pub fn new(method: &str, params: Value) -> Self {
        Self { method: method.to_owned(), params }
    }
}

pub async fn dispatch(state: &AppState, caller: &Caller, raw: RawCall) -> AppResult<Value> {
    let Some(spec) = lookup(&raw.method) else {
        return Err(AppError::MethodNotFound(raw.method));
    };

    if spec.requires_login {
        caller.require("User must be logged-in to call this method")?;
    }

    MethodCall::decode(spec.name, raw.params)?
        .execute(state, caller)
        .await
}

#[debug_handler(state = AppState)]
async fn call_method(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let raw: RawCall = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("malformed method call: {e}")))?;

    let result = dispatch(&state, &caller, raw).await?;
    Ok(Json(json!({ "result": result })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/methods", post(call_method))
}
