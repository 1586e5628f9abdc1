use axum::{http::StatusCode, response::IntoResponse};
use coursesched_api::middleware::error_handling::AppError;
use coursesched_core::{
    errors::{Resource, SchedError},
    models::TimeSlot,
};
use rstest::rstest;
use uuid::Uuid;

fn conflict() -> SchedError {
    SchedError::Conflict {
        resource: Resource::Classroom("A101".to_string()),
        slot: TimeSlot::parse(1, "08:00", "09:40").unwrap(),
        existing: Uuid::new_v4(),
    }
}

#[rstest]
#[case(SchedError::NotFound("Course".to_string()), StatusCode::NOT_FOUND)]
#[case(SchedError::InvalidInput("day_of_week".to_string()), StatusCode::BAD_REQUEST)]
#[case(conflict(), StatusCode::CONFLICT)]
#[case(SchedError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    SchedError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: SchedError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_from_sched_error() {
    let error: AppError = SchedError::NotFound("Teacher".to_string()).into();

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}
