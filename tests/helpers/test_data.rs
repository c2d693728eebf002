//! Test data builders

use chrono::Duration;
use uuid::Uuid;

use ewm::models::event::NewEventDto;
use ewm::models::location::LocationDto;
use ewm::models::user::NewUserRequest;
use ewm::utils::datetime;

/// A user with a unique name
pub fn new_user() -> NewUserRequest {
    let suffix = &Uuid::new_v4().to_string()[..8];
    NewUserRequest {
        name: format!("user-{suffix}"),
        email: format!("user-{suffix}@example.com"),
    }
}

/// A valid event scheduled `hours_ahead` hours from now
pub fn new_event(category_id: i64, participant_limit: i32, hours_ahead: i64) -> NewEventDto {
    let event_date = datetime::now() + Duration::hours(hours_ahead);
    NewEventDto {
        annotation: "A full weekend of social dancing downtown".to_string(),
        category: category_id,
        description: "Two evenings of social dancing with live bands and late-night jams"
            .to_string(),
        event_date: datetime::format(event_date),
        location: LocationDto {
            lat: 55.75,
            lon: 37.62,
        },
        paid: false,
        participant_limit,
        request_moderation: true,
        title: "Weekend lindy exchange".to_string(),
    }
}
