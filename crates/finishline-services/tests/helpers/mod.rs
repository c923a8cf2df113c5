use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use finishline_core::models::{Completion, CompletionImage, Participant, PhotoComment};
use finishline_core::UploadLimits;
use finishline_services::{
    Authorizer, CompletionService, Identity, MemoryEventStore, VoteService,
};

pub const EVENT_YEAR: i32 = 2026;

pub struct TestApp {
    pub store: Arc<MemoryEventStore>,
    pub authorizer: Authorizer,
    pub votes: VoteService,
    pub completions: CompletionService,
    pub limits: UploadLimits,
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryEventStore::new());
    let authorizer = Authorizer::new(store.clone(), store.clone());
    let votes = VoteService::new(authorizer.clone(), store.clone());
    let limits = UploadLimits::default();
    let completions = CompletionService::new(
        authorizer.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        limits.clone(),
    );
    TestApp {
        store,
        authorizer,
        votes,
        completions,
        limits,
    }
}

pub fn register_participant(app: &TestApp, identity_id: &str) -> (Participant, Identity) {
    let participant = Participant {
        id: Uuid::new_v4(),
        identity_id: Some(identity_id.to_string()),
        email: format!("{identity_id}@example.com"),
        display_name: identity_id.to_string(),
        bib_number: None,
        completed: true,
        event_year: EVENT_YEAR,
        registered_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    };
    app.store.add_participant(participant.clone());
    let identity = Identity {
        id: identity_id.to_string(),
        email: participant.email.clone(),
    };
    (participant, identity)
}

pub fn add_completion(app: &TestApp, owner: &Participant) -> Completion {
    let completion = Completion {
        id: Uuid::new_v4(),
        participant_id: owner.id,
        event_year: EVENT_YEAR,
        completed_on: NaiveDate::from_ymd_opt(EVENT_YEAR, 6, 14).unwrap(),
        duration: Some("4:32:10".to_string()),
        comment: None,
        vote_count: 0,
        comment_count: 0,
        image_count: 0,
        created_at: Utc.with_ymd_and_hms(2026, 6, 14, 18, 0, 0).unwrap(),
    };
    app.store.add_completion(completion.clone());
    completion
}

pub fn add_image(app: &TestApp, completion: &Completion, display_order: i32) -> CompletionImage {
    let image = CompletionImage {
        id: Uuid::new_v4(),
        completion_id: completion.id,
        participant_id: completion.participant_id,
        event_year: completion.event_year,
        storage_url: format!("/photos/{}.jpg", Uuid::new_v4()),
        starred: display_order == 0,
        display_order,
        caption: None,
        uploaded_at: Utc.with_ymd_and_hms(2026, 6, 14, 18, 5, 0).unwrap(),
    };
    app.store.add_image(image.clone());
    image
}

pub fn add_comment(
    app: &TestApp,
    completion: &Completion,
    author: &Participant,
    body: &str,
) -> PhotoComment {
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap();
    let comment = PhotoComment {
        id: Uuid::new_v4(),
        completion_id: completion.id,
        participant_id: author.id,
        body: body.to_string(),
        created_at: now,
        updated_at: now,
    };
    app.store.add_comment(comment.clone());
    comment
}
