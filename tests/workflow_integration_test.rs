//! End-to-end workflow tests against a real PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored`, either with a database at
//! `TEST_DATABASE_URL` or with Docker available for testcontainers.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use ewm::config::Settings;
use ewm::database::DatabaseService;
use ewm::models::event::{UpdateEventAdminRequest, UpdateEventUserRequest};
use ewm::models::request::{EventRequestStatusUpdateRequest, RequestStatus};
use ewm::services::ServiceFactory;
use ewm::EwmError;

use helpers::database_helper::TestDatabase;
use helpers::test_data;

async fn setup() -> (TestDatabase, ServiceFactory) {
    let db = TestDatabase::new().await.expect("test database");
    db.truncate_main().await.expect("truncate");
    let services = ServiceFactory::new(DatabaseService::new(db.pool.clone()), &Settings::default())
        .expect("service factory");
    (db, services)
}

fn publish_action() -> UpdateEventAdminRequest {
    UpdateEventAdminRequest {
        state_action: Some("PUBLISH_EVENT".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_capacity_gated_confirmation_splits_batch() {
    let (_db, services) = setup().await;

    // create event with limit 1 and moderation on, publish it
    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "dance".to_string() })
        .await
        .unwrap();
    let event = services
        .event_service
        .post_event(initiator.id, test_data::new_event(category.id, 1, 3))
        .await
        .unwrap();
    assert_eq!(event.state.as_str(), "PENDING");

    let published = services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await
        .unwrap();
    assert_eq!(published.state.as_str(), "PUBLISHED");
    assert!(published.published_on.is_some());

    // two distinct users request participation, both pending
    let walker = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let dancer = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let first = services.request_service.create_request(walker.id, event.id).await.unwrap();
    let second = services.request_service.create_request(dancer.id, event.id).await.unwrap();
    assert_eq!(first.status, RequestStatus::Pending);
    assert_eq!(second.status, RequestStatus::Pending);

    // the initiator confirms both ids: one slot, so 1 confirmed + 1 rejected
    let result = services
        .event_service
        .update_request_statuses(
            initiator.id,
            event.id,
            EventRequestStatusUpdateRequest {
                request_ids: vec![first.id, second.id],
                status: "CONFIRMED".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.confirmed_requests.len(), 1);
    assert_eq!(result.rejected_requests.len(), 1);
    assert_eq!(result.confirmed_requests[0].id, first.id);
    assert_eq!(result.rejected_requests[0].id, second.id);

    let event_after = services
        .event_service
        .get_event_by_initiator(initiator.id, event.id)
        .await
        .unwrap();
    assert_eq!(event_after.confirmed_requests, 1);

    // the limit is now reached: a third request bounces
    let third_user = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let result = services.request_service.create_request(third_user.id, event.id).await;
    assert_matches!(result, Err(EwmError::NoFreeSlots));

    // reviewing again fails the precondition outright
    let result = services
        .event_service
        .update_request_statuses(
            initiator.id,
            event.id,
            EventRequestStatusUpdateRequest {
                request_ids: vec![second.id],
                status: "CONFIRMED".to_string(),
            },
        )
        .await;
    assert_matches!(result, Err(EwmError::ParticipantLimitReached));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_cancelling_confirmed_request_frees_slot() {
    let (_db, services) = setup().await;

    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "jam".to_string() })
        .await
        .unwrap();
    let event = services
        .event_service
        .post_event(initiator.id, test_data::new_event(category.id, 1, 3))
        .await
        .unwrap();
    services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await
        .unwrap();

    let walker = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let request = services.request_service.create_request(walker.id, event.id).await.unwrap();
    services
        .event_service
        .update_request_statuses(
            initiator.id,
            event.id,
            EventRequestStatusUpdateRequest {
                request_ids: vec![request.id],
                status: "CONFIRMED".to_string(),
            },
        )
        .await
        .unwrap();

    let canceled = services.request_service.cancel_request(walker.id, request.id).await.unwrap();
    assert_eq!(canceled.status, RequestStatus::Canceled);

    // the counter tracks currently confirmed requests, so the slot is free again
    let event_after = services
        .event_service
        .get_event_by_initiator(initiator.id, event.id)
        .await
        .unwrap();
    assert_eq!(event_after.confirmed_requests, 0);

    let dancer = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let request = services.request_service.create_request(dancer.id, event.id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_unmoderated_event_confirms_immediately() {
    let (_db, services) = setup().await;

    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "social".to_string() })
        .await
        .unwrap();
    let mut dto = test_data::new_event(category.id, 10, 3);
    dto.request_moderation = false;
    let event = services.event_service.post_event(initiator.id, dto).await.unwrap();
    services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await
        .unwrap();

    let walker = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let request = services.request_service.create_request(walker.id, event.id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Confirmed);

    let event_after = services
        .event_service
        .get_event_by_initiator(initiator.id, event.id)
        .await
        .unwrap();
    assert_eq!(event_after.confirmed_requests, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_request_against_unpublished_event_conflicts() {
    let (_db, services) = setup().await;

    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "blues".to_string() })
        .await
        .unwrap();
    let event = services
        .event_service
        .post_event(initiator.id, test_data::new_event(category.id, 0, 3))
        .await
        .unwrap();

    let walker = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let result = services.request_service.create_request(walker.id, event.id).await;
    assert_matches!(result, Err(EwmError::EventNotPublished));

    // self-requests conflict too, even on published events
    services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await
        .unwrap();
    let result = services.request_service.create_request(initiator.id, event.id).await;
    assert_matches!(result, Err(EwmError::SelfParticipation));

    // and duplicates are refused while a request is active
    services.request_service.create_request(walker.id, event.id).await.unwrap();
    let result = services.request_service.create_request(walker.id, event.id).await;
    assert_matches!(result, Err(EwmError::DuplicateRequest));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_published_event_is_immutable_for_initiator() {
    let (_db, services) = setup().await;

    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "swing".to_string() })
        .await
        .unwrap();
    let event = services
        .event_service
        .post_event(initiator.id, test_data::new_event(category.id, 0, 3))
        .await
        .unwrap();
    services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await
        .unwrap();

    let result = services
        .event_service
        .update_event_by_initiator(
            initiator.id,
            event.id,
            UpdateEventUserRequest {
                title: Some("Renamed exchange".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(EwmError::PublishedEventImmutable));

    // a second admin action on the published event conflicts as well
    let result = services
        .event_service
        .update_event_by_admin(event.id, publish_action())
        .await;
    assert_matches!(result, Err(EwmError::EventStateFinal));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_category_with_events_cannot_be_deleted() {
    let (_db, services) = setup().await;

    let initiator = services.user_service.post_user(test_data::new_user()).await.unwrap();
    let category = services
        .category_service
        .post_category(ewm::models::category::NewCategoryDto { name: "festivals".to_string() })
        .await
        .unwrap();
    services
        .event_service
        .post_event(initiator.id, test_data::new_event(category.id, 0, 3))
        .await
        .unwrap();

    let result = services.category_service.delete_category(category.id).await;
    assert_matches!(result, Err(EwmError::CategoryNotEmpty));
}
