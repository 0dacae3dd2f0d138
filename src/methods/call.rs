use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    chats::{self, MessageType},
    comments::{self, CommentInput},
    events::{self, EventInput},
    profiles::{self, Profile},
    session::Caller,
    AppError, AppResult, AppState,
};

#[derive(Debug)]
pub enum MethodCall {
    AddChat { receiver_id: String },
    RemoveChat { chat_id: String },
    UpdateProfile { profile: Profile },
    AddMessage { kind: MessageType, chat_id: String, content: String },
    CountMessages,
    AddEvent { event: EventInput },
    UpdateEvent { event: EventInput },
    AddComment { comment: CommentInput },
    DeleteComment { comment_id: String, creator_id: String },
    CountComments { event_id: String },
    SubscribeEvent { event_id: String },
    UnsubscribeEvent { event_id: String },
    IGoSubscribeEvent { event_id: String },
    IGoUnsubscribeEvent { event_id: String },
}

/// Positional params come as a JSON array; tuples decode from exactly that.
fn params<T: DeserializeOwned>(method: &str, params: Value) -> AppResult<T> {
    serde_json::from_value(params)
        .map_err(|e| AppError::validation(format!("{method}: invalid params: {e}")))
}

impl MethodCall {
    pub fn decode(method: &str, raw: Value) -> AppResult<Self> {
        use MethodCall::*;

        Ok(match method {
            "addChat" => {
                let (receiver_id,) = params(method, raw)?;
                AddChat { receiver_id }
            }
            "removeChat" => {
                let (chat_id,) = params(method, raw)?;
                RemoveChat { chat_id }
            }
            "updateProfile" => {
                let (profile,) = params(method, raw)?;
                UpdateProfile { profile }
            }
            "addMessage" => {
                let (kind, chat_id, content) = params(method, raw)?;
                AddMessage { kind, chat_id, content }
            }
            "countMessages" => CountMessages,
            "addEvent" => {
                let (event,) = params(method, raw)?;
                AddEvent { event }
            }
            "updateEvent" => {
                let (event,) = params(method, raw)?;
                UpdateEvent { event }
            }
            "addComment" => {
                let (comment,) = params(method, raw)?;
                AddComment { comment }
            }
            "deleteComment" => {
                let (comment_id, creator_id) = params(method, raw)?;
                DeleteComment { comment_id, creator_id }
            }
            "countComments" => {
                let (event_id,) = params(method, raw)?;
                CountComments { event_id }
            }
            "subscribeEvent" => {
                let (event_id,) = params(method, raw)?;
                SubscribeEvent { event_id }
            }
            "unsubscribeEvent" => {
                let (event_id,) = params(method, raw)?;
                UnsubscribeEvent { event_id }
            }
            "iGoSubscribeEvent" => {
                let (event_id,) = params(method, raw)?;
                IGoSubscribeEvent { event_id }
            }
            "iGoUnsubscribeEvent" => {
                let (event_id,) = params(method, raw)?;
                IGoUnsubscribeEvent { event_id }
            }
            other => return Err(AppError::MethodNotFound(other.to_owned())),
        })
    }

    pub async fn execute(self, state: &AppState, caller: &Caller) -> AppResult<Value> {
        use MethodCall::*;

        let db_pool = &state.db_pool;
        match self {
            AddChat { receiver_id } => chats::add_chat(db_pool, caller, &receiver_id).await?,
            RemoveChat { chat_id } => chats::remove_chat(db_pool, caller, &chat_id).await?,
            UpdateProfile { profile } => profiles::update_profile(db_pool, caller, profile).await?,
            AddMessage { kind, chat_id, content } => {
                let reply = chats::add_message(db_pool, &state.tx, caller, kind, &chat_id, &content).await?;
                return Ok(serde_json::to_value(reply)?);
            }
            CountMessages => return Ok(chats::count_messages(db_pool).await?.into()),
            AddEvent { event } => events::add_event(db_pool, caller, event).await?,
            UpdateEvent { event } => events::update_event(db_pool, caller, event).await?,
            AddComment { comment } => comments::add_comment(db_pool, caller, comment).await?,
            DeleteComment { comment_id, creator_id } => {
                comments::delete_comment(db_pool, caller, &comment_id, &creator_id).await?
            }
            CountComments { event_id } => return Ok(comments::count_comments(db_pool, &event_id).await?.into()),
            SubscribeEvent { event_id } => events::subscribe_event(db_pool, caller, &event_id).await?,
            UnsubscribeEvent { event_id } => events::unsubscribe_event(db_pool, caller, &event_id).await?,
            IGoSubscribeEvent { event_id } => events::i_go_subscribe_event(db_pool, caller, &event_id).await?,
            IGoUnsubscribeEvent { event_id } => events::i_go_unsubscribe_event(db_pool, caller, &event_id).await?,
        }

        Ok(Value::Null)
    }
}
