use gatherchat::{
    chats,
    methods::{dispatch, RawCall, CATALOG},
    AppError, AppState, Caller,
};
use serde_json::{json, Value};

use crate::helpers::{count, event_by, id, test_state, user};

fn call(method: &str, params: Value) -> RawCall {
    RawCall::new(method, params)
}

async fn snapshot(state: &AppState) -> (i64, i64, i64, i64, i64) {
    (
        count(state, "chats").await,
        count(state, "messages").await,
        count(state, "events").await,
        count(state, "comments").await,
        count(state, "event_subscriptions").await,
    )
}

#[tokio::test]
async fn anonymous_calls_fail_without_mutation() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    chats::add_chat(&state.db_pool, &u1, &id(&u2)).await.unwrap();
    let chat_id = chats::list_chats(&state.db_pool, &u1).await.unwrap()[0].id.clone();
    let event_id = event_by(&state, &u1, "Picnic").await;

    let calls = [
        call("addChat", json!([id(&u1)])),
        call("removeChat", json!([chat_id])),
        call("updateProfile", json!([{ "name": "Ghost" }])),
        call("addMessage", json!(["text", chat_id, "boo"])),
        call("addEvent", json!([{ "creatorId": id(&u1), "name": "Ghost party" }])),
        call("updateEvent", json!([{ "_id": event_id, "creatorId": id(&u1), "name": "Ghost party" }])),
        call("addComment", json!([{ "creatorId": id(&u1), "text": "boo", "docId": event_id }])),
        call("deleteComment", json!(["c1", id(&u1)])),
        call("subscribeEvent", json!([event_id])),
        call("unsubscribeEvent", json!([event_id])),
        call("iGoSubscribeEvent", json!([event_id])),
        call("iGoUnsubscribeEvent", json!([event_id])),
    ];

    let before = snapshot(&state).await;

    for raw in calls {
        let method = raw.method.clone();
        let err = dispatch(&state, &Caller::anonymous(), raw).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)), "{method}: {err:?}");
    }

    assert_eq!(snapshot(&state).await, before);
}

#[tokio::test]
async fn identity_is_checked_before_shape() {
    let state = test_state().await;
    let err = dispatch(&state, &Caller::anonymous(), call("addChat", json!("not an array")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn counts_need_no_login() {
    let state = test_state().await;
    let anonymous = Caller::anonymous();

    let messages = dispatch(&state, &anonymous, call("countMessages", json!([]))).await.unwrap();
    assert_eq!(messages, json!(0));

    let comments = dispatch(&state, &anonymous, call("countComments", json!(["e1"]))).await.unwrap();
    assert_eq!(comments, json!(0));
}

#[tokio::test]
async fn unknown_methods_are_reported() {
    let state = test_state().await;
    let err = dispatch(&state, &Caller::anonymous(), call("dropDatabase", json!([]))).await.unwrap_err();
    assert!(matches!(err, AppError::MethodNotFound(ref name) if name == "dropDatabase"));
}

#[tokio::test]
async fn message_type_is_a_closed_set() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    chats::add_chat(&state.db_pool, &u1, &id(&u2)).await.unwrap();
    let chat_id = chats::list_chats(&state.db_pool, &u1).await.unwrap()[0].id.clone();

    let err = dispatch(&state, &u1, call("addMessage", json!(["picture", chat_id, "x.png"])))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count(&state, "messages").await, 0);
}

#[tokio::test]
async fn add_message_returns_the_new_id() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;

    let created = dispatch(&state, &u1, call("addChat", json!([id(&u2)]))).await.unwrap();
    assert_eq!(created, Value::Null);
    let chat_id = chats::list_chats(&state.db_pool, &u1).await.unwrap()[0].id.clone();

    let reply = dispatch(&state, &u2, call("addMessage", json!(["text", chat_id, "hi"]))).await.unwrap();
    assert!(reply["messageId"].as_str().is_some_and(|id| !id.is_empty()));

    let total = dispatch(&state, &u1, call("countMessages", Value::Null)).await.unwrap();
    assert_eq!(total, json!(1));
}

#[tokio::test]
async fn every_catalog_method_decodes_its_own_name() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    // garbage params must never be mistaken for an unknown method
    for spec in CATALOG {
        let result = dispatch(&state, &u1, call(spec.name, json!([[], [], []]))).await;
        if let Err(err) = result {
            assert!(!matches!(err, AppError::MethodNotFound(_)), "{}", spec.name);
        }
    }
}
