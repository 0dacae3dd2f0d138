use axum::{
    debug_handler,
    extract::{ws::Message as WsMessage, Path, State, WebSocketUpgrade},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::{session::Caller, AppError, AppResult};

use super::{is_member, Message};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn chat_ws(
    Path(chat_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    State(tx): State<broadcast::Sender<Message>>,
    caller: Caller,

    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let user_id = caller.require("User must be logged-in to follow a chat")?.to_owned();

    if !is_member(&db_pool, &chat_id, &user_id).await? {
        return Err(AppError::NotFound("chat"));
    }

    let mut rx = tx.subscribe();

    Ok(ws.on_upgrade(move |stream| async move {
        let (mut sender, mut receiver) = stream.split();

        let mut broadcast_task = tokio::spawn(async move {
            loop {
                let msg = match rx.recv().await {
                    Ok(msg) => msg,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("chat {} follower lagged, skipped {skipped} messages", chat_id);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                if msg.chat_id != chat_id {
                    continue;
                }

                let Ok(json) = serde_json::to_string(&msg) else {
                    continue;
                };

                if sender.send(WsMessage::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        // inbound frames carry nothing; sends go through the methods
        let mut inbound_task = tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                if let WsMessage::Close(_) = msg {
                    break;
                }
            }
        });

        tokio::select! {
            _ = &mut broadcast_task => inbound_task.abort(),
            _ = &mut inbound_task => broadcast_task.abort(),
        };

        debug!("{user_id} stopped following chat");
    }))
}
