use gatherchat::{profiles::{self, Profile}, AppError, Caller};

use crate::helpers::{id, test_state, user};

#[tokio::test]
async fn new_users_get_a_generated_name() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    let public = profiles::get_profile(&state.db_pool, &id(&u1)).await.unwrap();
    assert!(!public.profile.name.is_empty());
    assert_eq!(public.profile.picture_id, None);
}

#[tokio::test]
async fn same_phone_is_the_same_user() {
    let state = test_state().await;
    let first = user(&state, "+15550001").await;
    let second = user(&state, "+15550001").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn update_replaces_own_profile() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    let profile = Profile {
        name: "Ana".to_owned(),
        picture_id: Some("p1".to_owned()),
        description: Some("hello".to_owned()),
    };
    profiles::update_profile(&state.db_pool, &u1, profile.clone()).await.unwrap();
    assert_eq!(profiles::get_profile(&state.db_pool, &id(&u1)).await.unwrap().profile, profile);

    // replacing drops fields not given
    let bare = Profile { name: "Ana B".to_owned(), picture_id: None, description: None };
    profiles::update_profile(&state.db_pool, &u1, bare.clone()).await.unwrap();
    assert_eq!(profiles::get_profile(&state.db_pool, &id(&u1)).await.unwrap().profile, bare);
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let state = test_state().await;
    let u1 = user(&state, "+15550001").await;

    for profile in [
        Profile { name: String::new(), picture_id: None, description: None },
        Profile { name: "Ana".to_owned(), picture_id: Some(String::new()), description: None },
        Profile { name: "Ana".to_owned(), picture_id: None, description: Some(String::new()) },
    ] {
        let err = profiles::update_profile(&state.db_pool, &u1, profile).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn anonymous_cannot_update() {
    let state = test_state().await;
    let profile = Profile { name: "Ghost".to_owned(), picture_id: None, description: None };

    let err = profiles::update_profile(&state.db_pool, &Caller::anonymous(), profile).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
