mod helpers;

use helpers::{add_comment, add_completion, register_participant, setup_test_app};
use uuid::Uuid;

use finishline_core::{AppError, ErrorMetadata};
use finishline_services::{AuthzError, Identity, ResourceRef};

/// Participant B must not be able to delete participant A's comment, and the
/// refusal must look exactly like the resource not existing.
#[tokio::test]
async fn test_foreign_comment_delete_is_forbidden() {
    let app = setup_test_app();
    let (alice, _alice_identity) = register_participant(&app, "auth0|alice");
    let (_bob, bob_identity) = register_participant(&app, "auth0|bob");

    let completion = add_completion(&app, &alice);
    let comment = add_comment(&app, &completion, &alice, "great finish!");

    let err = app
        .completions
        .delete_comment(Some(&bob_identity), comment.id)
        .await
        .expect_err("Bob must not delete Alice's comment");

    assert_eq!(err.http_status_code(), 403);
    assert!(
        app.store.comment_exists(comment.id),
        "Comment must survive the rejected delete"
    );
}

#[tokio::test]
async fn test_missing_and_foreign_resources_are_indistinguishable() {
    let app = setup_test_app();
    let (alice, _) = register_participant(&app, "auth0|alice");
    let (_bob, bob_identity) = register_participant(&app, "auth0|bob");

    let completion = add_completion(&app, &alice);
    let comment = add_comment(&app, &completion, &alice, "nice one");

    let foreign: AppError = app
        .authorizer
        .authorize_mutation(Some(&bob_identity), ResourceRef::Comment(comment.id))
        .await
        .expect_err("foreign comment must be rejected")
        .into();
    let missing: AppError = app
        .authorizer
        .authorize_mutation(Some(&bob_identity), ResourceRef::Comment(Uuid::new_v4()))
        .await
        .expect_err("missing comment must be rejected")
        .into();

    assert_eq!(foreign.http_status_code(), missing.http_status_code());
    assert_eq!(foreign.error_code(), missing.error_code());
    assert_eq!(foreign.client_message(), missing.client_message());
}

#[tokio::test]
async fn test_unauthenticated_caller_is_rejected() {
    let app = setup_test_app();
    let (alice, _) = register_participant(&app, "auth0|alice");
    let completion = add_completion(&app, &alice);

    let err = app
        .authorizer
        .authorize_mutation(None, ResourceRef::Completion(completion.id))
        .await
        .expect_err("anonymous caller must be rejected");

    assert!(matches!(err, AuthzError::Unauthenticated));
}

#[tokio::test]
async fn test_identity_without_participant_record_is_rejected() {
    let app = setup_test_app();
    let (alice, _) = register_participant(&app, "auth0|alice");
    let completion = add_completion(&app, &alice);

    let stranger = Identity {
        id: "auth0|stranger".to_string(),
        email: "stranger@example.com".to_string(),
    };

    let err = app
        .authorizer
        .authorize_mutation(Some(&stranger), ResourceRef::Completion(completion.id))
        .await
        .expect_err("unlinked identity must be rejected");

    assert!(matches!(err, AuthzError::NoParticipantRecord));
}

/// Ownership is re-read on every call, so a transfer between two requests
/// changes the outcome of the second.
#[tokio::test]
async fn test_ownership_change_is_visible_on_next_call() {
    let app = setup_test_app();
    let (alice, alice_identity) = register_participant(&app, "auth0|alice");
    let (bob, _) = register_participant(&app, "auth0|bob");

    let completion = add_completion(&app, &alice);

    app.authorizer
        .authorize_mutation(Some(&alice_identity), ResourceRef::Completion(completion.id))
        .await
        .expect("Alice owns the completion");

    app.store.reassign_completion(completion.id, bob.id);

    let err = app
        .authorizer
        .authorize_mutation(Some(&alice_identity), ResourceRef::Completion(completion.id))
        .await
        .expect_err("reassigned completion must no longer pass for Alice");

    assert!(matches!(err, AuthzError::Forbidden { .. }));
}

#[tokio::test]
async fn test_owner_can_delete_own_comment() {
    let app = setup_test_app();
    let (alice, alice_identity) = register_participant(&app, "auth0|alice");
    let completion = add_completion(&app, &alice);
    let comment = add_comment(&app, &completion, &alice, "my own note");

    app.completions
        .delete_comment(Some(&alice_identity), comment.id)
        .await
        .expect("owner delete must succeed");

    assert!(!app.store.comment_exists(comment.id));
}
