use std::collections::BTreeSet;

use gatherchat::{events::{self, EventInput}, AppError, Caller};
use serde_json::json;

use crate::helpers::{count, event_by, id, test_state, user};

fn input(value: serde_json::Value) -> EventInput {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn creator_can_add_event() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    let event_id = event_by(&state, &u1, "Picnic").await;
    let event = events::get_event(&state.db_pool, &event_id).await.unwrap();

    assert_eq!(event.creator_id, id(&u1));
    assert_eq!(event.description.as_deref(), Some("bring snacks"));
    assert!(event.subscribers.is_empty());
    assert!(event.i_go_subscribers.is_empty());
}

#[tokio::test]
async fn add_event_for_someone_else_is_a_silent_no_op() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;

    let result = events::add_event(&state.db_pool, &u2, input(json!({
        "creatorId": id(&u1),
        "name": "Forged",
    }))).await;

    assert!(result.is_ok());
    assert_eq!(count(&state, "events").await, 0);
}

#[tokio::test]
async fn add_event_validates_before_ownership() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    let err = events::add_event(&state.db_pool, &u1, input(json!({ "creatorId": id(&u1), "name": "" })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = events::add_event(&state.db_pool, &u1, input(json!({ "name": "No creator" })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn creator_can_update_event() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    events::update_event(&state.db_pool, &u1, input(json!({
        "_id": event_id,
        "creatorId": id(&u1),
        "name": "Beach picnic",
        "dateStart": "2026-07-01T10:00:00Z",
    }))).await.unwrap();

    let event = events::get_event(&state.db_pool, &event_id).await.unwrap();
    assert_eq!(event.name, "Beach picnic");
    // every editable field is replaced, including the ones left out
    assert_eq!(event.description, None);
    assert!(event.date_start.is_some());
}

#[tokio::test]
async fn update_by_non_creator_changes_nothing_and_does_not_fail() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    let event_id = event_by(&state, &u1, "Picnic").await;
    let before = events::get_event(&state.db_pool, &event_id).await.unwrap();

    // honest about the creator
    events::update_event(&state.db_pool, &u2, input(json!({
        "_id": event_id,
        "creatorId": id(&u1),
        "name": "Hijacked",
    }))).await.unwrap();

    // lying about the creator
    events::update_event(&state.db_pool, &u2, input(json!({
        "_id": event_id,
        "creatorId": id(&u2),
        "name": "Hijacked",
    }))).await.unwrap();

    assert_eq!(events::get_event(&state.db_pool, &event_id).await.unwrap(), before);
}

#[tokio::test]
async fn update_requires_a_name() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    let err = events::update_event(&state.db_pool, &u1, input(json!({
        "_id": event_id,
        "creatorId": id(&u1),
        "name": "",
    }))).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn subscribe_then_unsubscribe_restores_subscribers() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    let u3 = user(&state, "+15550003").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    events::subscribe_event(&state.db_pool, &u3, &event_id).await.unwrap();
    let before = events::get_event(&state.db_pool, &event_id).await.unwrap().subscribers;

    events::subscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    let during = events::get_event(&state.db_pool, &event_id).await.unwrap().subscribers;
    assert!(during.contains(&id(&u2)));

    events::unsubscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    let after = events::get_event(&state.db_pool, &event_id).await.unwrap().subscribers;
    assert_eq!(after, before);
}

#[tokio::test]
async fn subscribing_twice_keeps_one_entry() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    events::subscribe_event(&state.db_pool, &u1, &event_id).await.unwrap();
    events::subscribe_event(&state.db_pool, &u1, &event_id).await.unwrap();

    let event = events::get_event(&state.db_pool, &event_id).await.unwrap();
    assert_eq!(event.subscribers, BTreeSet::from([id(&u1)]));
}

#[tokio::test]
async fn tiers_are_independent() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    events::subscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    events::i_go_subscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();

    events::i_go_unsubscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    let event = events::get_event(&state.db_pool, &event_id).await.unwrap();
    assert!(event.subscribers.contains(&id(&u2)));
    assert!(event.i_go_subscribers.is_empty());
}

#[tokio::test]
async fn unsubscribe_leaves_both_tiers() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let u2 = user(&state, "+15550002").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    events::subscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    events::i_go_subscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();
    events::unsubscribe_event(&state.db_pool, &u2, &event_id).await.unwrap();

    let event = events::get_event(&state.db_pool, &event_id).await.unwrap();
    assert!(event.subscribers.is_empty());
    assert!(event.i_go_subscribers.is_empty());
}

#[tokio::test]
async fn subscribing_to_unknown_event_is_ignored() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    events::subscribe_event(&state.db_pool, &u1, "ghost").await.unwrap();
    events::i_go_subscribe_event(&state.db_pool, &u1, "ghost").await.unwrap();
    assert_eq!(count(&state, "event_subscriptions").await, 0);
}

#[tokio::test]
async fn subscriptions_need_login_and_an_id() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;
    let event_id = event_by(&state, &u1, "Picnic").await;

    let err = events::subscribe_event(&state.db_pool, &Caller::anonymous(), &event_id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = events::i_go_unsubscribe_event(&state.db_pool, &u1, "").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let state = test_state().await;
    let err = events::get_event(&state.db_pool, "ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("event")));
}
