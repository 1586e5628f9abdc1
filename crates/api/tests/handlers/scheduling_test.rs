use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use coursesched_api::{app, handlers::scheduling::AutoScheduleResponse, ApiState};
use coursesched_core::{
    models::ScheduleRecord, store::ScheduleStore, SchedulerConfig, SchedulingEngine,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn schedule_body(
    course_id: Uuid,
    teacher_id: Uuid,
    classroom: &str,
    day: i64,
    start: &str,
    end: &str,
) -> Value {
    json!({
        "course_id": course_id,
        "teacher_id": teacher_id,
        "classroom_id": classroom,
        "day_of_week": day,
        "start_time": start,
        "end_time": end,
    })
}

#[test_log::test(tokio::test)]
async fn test_schedule_class_success() {
    let ctx = TestContext::new().await;
    let (teacher_id, course_id) = ctx.staffed_course("Ada", "Algorithms").await;

    let response = ctx
        .server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(course_id, teacher_id, "A101", 1, "08:00", "09:40"))
        .await;

    response.assert_status_ok();
    let record: ScheduleRecord = response.json();
    assert_eq!(record.course_id, course_id);
    assert_eq!(record.classroom_id, "A101");
    assert_eq!(record.time_slot.to_string(), "Mon 08:00-09:40");

    let course = ctx.store.find_course(course_id).await.unwrap().unwrap();
    assert_eq!(course.schedule, Some(record));
}

#[tokio::test]
async fn test_schedule_class_response_shape() {
    let ctx = TestContext::new().await;
    let (teacher_id, course_id) = ctx.staffed_course("Ada", "Algorithms").await;

    let body: Value = ctx
        .server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(course_id, teacher_id, "B102", 6, "14:00", "15:40"))
        .await
        .json();

    assert_eq!(
        body["time_slot"],
        json!({ "day_of_week": 6, "start_time": "14:00", "end_time": "15:40" })
    );
    assert_eq!(body["teacher_id"], json!(teacher_id));
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_teacher_conflict_returns_409() {
    let ctx = TestContext::new().await;
    let (teacher_id, first) = ctx.staffed_course("Ada", "Algorithms").await;
    let second = ctx.store.add_course("Databases", Some(teacher_id)).await;

    ctx.server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(first, teacher_id, "A101", 2, "10:00", "11:40"))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(second, teacher_id, "A202", 2, "11:00", "12:30"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(&format!("teacher {}", teacher_id)), "{message}");
}

#[tokio::test]
async fn test_classroom_conflict_returns_409_and_other_room_succeeds() {
    let ctx = TestContext::new().await;
    let (ada, algorithms) = ctx.staffed_course("Ada", "Algorithms").await;
    let (alan, logic) = ctx.staffed_course("Alan", "Logic").await;

    ctx.server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(algorithms, ada, "A103", 3, "16:00", "17:40"))
        .await
        .assert_status_ok();

    let clash = ctx
        .server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(logic, alan, "A103", 3, "16:00", "17:40"))
        .await;
    clash.assert_status(StatusCode::CONFLICT);
    let body: Value = clash.json();
    assert!(body["error"].as_str().unwrap().contains("classroom A103"));

    ctx.server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(logic, alan, "A201", 3, "16:00", "17:40"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_schedule_class_validation_errors() {
    let ctx = TestContext::new().await;
    let (teacher_id, course_id) = ctx.staffed_course("Ada", "Algorithms").await;

    for (day, start, end) in [(0, "08:00", "09:40"), (1, "8am", "09:40"), (1, "10:00", "09:00")] {
        ctx.server
            .post("/api/scheduling/schedule")
            .json(&schedule_body(course_id, teacher_id, "A101", day, start, end))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_schedule_class_not_found() {
    let ctx = TestContext::new().await;
    let (teacher_id, course_id) = ctx.staffed_course("Ada", "Algorithms").await;

    ctx.server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(Uuid::new_v4(), teacher_id, "A101", 1, "08:00", "09:40"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .post("/api/scheduling/schedule")
        .json(&schedule_body(course_id, teacher_id, "Z900", 1, "08:00", "09:40"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Resource not found: Classroom Z900 not found");
}

#[tokio::test]
async fn test_auto_schedule_endpoint() {
    let ctx = TestContext::new().await;
    for i in 0..3 {
        ctx.staffed_course(&format!("Teacher {i}"), &format!("Course {i}"))
            .await;
    }
    ctx.store.add_course("Unstaffed", None).await;

    let response = ctx.server.post("/api/scheduling/auto-schedule").await;

    response.assert_status_ok();
    let body: AutoScheduleResponse = response.json();
    assert_eq!(body.summary.scheduled_count, 3);
    assert_eq!(body.summary.unscheduled_count, 0);
    assert_eq!(
        body.message,
        "Auto-scheduling completed. Scheduled: 3, Unscheduled: 0"
    );
    let rooms: Vec<&str> = body
        .summary
        .assignments
        .iter()
        .map(|r| r.classroom_id.as_str())
        .collect();
    assert_eq!(rooms, vec!["A101", "A102", "A103"]);

    let again: AutoScheduleResponse = ctx
        .server
        .post("/api/scheduling/auto-schedule")
        .await
        .json();
    assert_eq!(again.summary.scheduled_count, 0);
    assert_eq!(again.summary.unscheduled_count, 0);
}

#[tokio::test]
async fn test_get_teacher_and_classroom_schedules() {
    let ctx = TestContext::new().await;
    let (ada, algorithms) = ctx.staffed_course("Ada", "Algorithms").await;
    let (alan, logic) = ctx.staffed_course("Alan", "Logic").await;

    for (course, teacher, day) in [(algorithms, ada, 1), (logic, alan, 2)] {
        ctx.server
            .post("/api/scheduling/schedule")
            .json(&schedule_body(course, teacher, "B101", day, "19:00", "20:40"))
            .await
            .assert_status_ok();
    }

    let ada_records: Vec<ScheduleRecord> = ctx
        .server
        .get(&format!("/api/scheduling/teacher/{}", ada))
        .await
        .json();
    assert_eq!(ada_records.len(), 1);
    assert_eq!(ada_records[0].course_id, algorithms);

    let room_records: Vec<ScheduleRecord> = ctx
        .server
        .get("/api/scheduling/classroom/B101")
        .await
        .json();
    assert_eq!(room_records.len(), 2);

    let empty: Vec<ScheduleRecord> = ctx
        .server
        .get(&format!("/api/scheduling/teacher/{}", Uuid::new_v4()))
        .await
        .json();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_json_400() {
    let ctx = TestContext::new().await;
    let (teacher_id, course_id) = ctx.staffed_course("Ada", "Algorithms").await;

    let mut wrong_day = schedule_body(course_id, teacher_id, "A101", 1, "08:00", "09:40");
    wrong_day["day_of_week"] = json!("Monday");
    let mut wrong_course = schedule_body(course_id, teacher_id, "A101", 1, "08:00", "09:40");
    wrong_course["course_id"] = json!("not-a-uuid");

    for body in [wrong_day, wrong_course] {
        let response = ctx
            .server
            .post("/api/scheduling/schedule")
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert!(
            error["error"].as_str().unwrap().starts_with("Invalid input:"),
            "{error}"
        );
    }
    assert!(ctx.store.records().await.is_empty());
}

#[tokio::test]
async fn test_auto_schedule_only_uses_known_classrooms() {
    let ctx = TestContext::new().await;
    let config = SchedulerConfig {
        classrooms: vec!["Z900".to_string(), "A102".to_string()],
        ..SchedulerConfig::default()
    };
    let engine = SchedulingEngine::new(ctx.store.clone(), config);
    let server = TestServer::new(app(Arc::new(ApiState { engine }))).unwrap();
    ctx.staffed_course("Ada", "Algorithms").await;

    let body: AutoScheduleResponse = server.post("/api/scheduling/auto-schedule").await.json();

    assert_eq!(body.summary.scheduled_count, 1);
    assert_eq!(body.summary.assignments[0].classroom_id, "A102");
    server
        .get("/api/scheduling/classroom/Z900")
        .await
        .assert_json(&json!([]));
}

#[tokio::test]
async fn test_list_schedules_paginates() {
    let ctx = TestContext::new().await;
    for i in 0..4 {
        ctx.staffed_course(&format!("Teacher {i}"), &format!("Course {i}"))
            .await;
    }
    ctx.server
        .post("/api/scheduling/auto-schedule")
        .await
        .assert_status_ok();

    let all: Vec<ScheduleRecord> = ctx.server.get("/api/scheduling").await.json();
    let page: Vec<ScheduleRecord> = ctx
        .server
        .get("/api/scheduling?skip=1&limit=2")
        .await
        .json();

    assert_eq!(all.len(), 4);
    assert_eq!(page, all[1..3].to_vec());

    let response = ctx.server.get("/api/scheduling?limit=lots").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
