use chrono::Utc;
use coursesched_core::{
    errors::SchedError,
    models::{ClockTime, Course, RecordFilter, ScheduleRecord, TimeSlot},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use serde_test::{Token, assert_de_tokens_error, assert_tokens};
use uuid::Uuid;

#[rstest]
#[case("00:00", 0)]
#[case("08:00", 480)]
#[case("09:40", 580)]
#[case("23:59", 1439)]
fn test_clock_time_parses_minutes(#[case] raw: &str, #[case] minutes: u16) {
    let time: ClockTime = raw.parse().unwrap();
    assert_eq!(time.minutes(), minutes);
    assert_eq!(time.to_string(), raw);
}

#[rstest]
#[case("8:00")]
#[case("08:0")]
#[case("24:00")]
#[case("12:60")]
#[case("0800")]
#[case("ab:cd")]
#[case("+1:00")]
#[case("")]
fn test_clock_time_rejects_malformed(#[case] raw: &str) {
    let result = raw.parse::<ClockTime>();
    assert!(matches!(result, Err(SchedError::InvalidInput(_))), "{raw}");
}

#[test]
fn test_clock_time_tokens() {
    let time: ClockTime = "14:05".parse().unwrap();
    assert_tokens(&time, &[Token::Str("14:05")]);
}

#[rstest]
#[case(0, "08:00", "09:40")]
#[case(8, "08:00", "09:40")]
#[case(-1, "08:00", "09:40")]
#[case(1, "09:40", "09:40")]
#[case(1, "10:00", "09:40")]
#[case(1, "7:00", "09:40")]
fn test_time_slot_rejects_invalid(#[case] day: i64, #[case] start: &str, #[case] end: &str) {
    let result = TimeSlot::parse(day, start, end);
    assert!(matches!(result, Err(SchedError::InvalidInput(_))));
}

#[test]
fn test_time_slot_accessors_and_display() {
    let slot = TimeSlot::parse(7, "19:00", "20:40").unwrap();

    assert_eq!(slot.day_of_week(), 7);
    assert_eq!(slot.start_time().minutes(), 19 * 60);
    assert_eq!(slot.end_time().minutes(), 20 * 60 + 40);
    assert_eq!(slot.to_string(), "Sun 19:00-20:40");
}

#[test]
fn test_time_slot_wire_shape() {
    let slot = TimeSlot::parse(1, "08:00", "09:40").unwrap();

    assert_eq!(
        to_value(slot).unwrap(),
        json!({ "day_of_week": 1, "start_time": "08:00", "end_time": "09:40" })
    );
}

#[test]
fn test_time_slot_deserialization_validates() {
    let ok: TimeSlot =
        from_str(r#"{"day_of_week":3,"start_time":"14:00","end_time":"15:40"}"#).unwrap();
    assert_eq!(ok, TimeSlot::parse(3, "14:00", "15:40").unwrap());

    let reversed =
        from_str::<TimeSlot>(r#"{"day_of_week":3,"start_time":"15:40","end_time":"14:00"}"#);
    assert!(reversed.is_err());

    assert_de_tokens_error::<TimeSlot>(
        &[
            Token::Struct {
                name: "TimeSlotFields",
                len: 3,
            },
            Token::Str("day_of_week"),
            Token::I64(9),
            Token::Str("start_time"),
            Token::Str("08:00"),
            Token::Str("end_time"),
            Token::Str("09:40"),
            Token::StructEnd,
        ],
        "Invalid input: day_of_week must be between 1 and 7, got 9",
    );
}

fn record(teacher_id: Uuid, classroom_id: &str) -> ScheduleRecord {
    ScheduleRecord {
        id: Uuid::new_v4(),
        course_id: Uuid::new_v4(),
        teacher_id,
        classroom_id: classroom_id.to_string(),
        time_slot: TimeSlot::parse(1, "08:00", "09:40").unwrap(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_record_filter_matching() {
    let teacher = Uuid::new_v4();
    let r = record(teacher, "A101");

    assert!(RecordFilter::default().matches(&r));
    assert!(RecordFilter::teacher(teacher).matches(&r));
    assert!(!RecordFilter::teacher(Uuid::new_v4()).matches(&r));
    assert!(RecordFilter::classroom("A101").matches(&r));
    assert!(!RecordFilter::classroom("A102").matches(&r));

    let both = RecordFilter {
        teacher_id: Some(teacher),
        classroom_id: Some("A102".to_string()),
    };
    assert!(!both.matches(&r));
}

#[test]
fn test_schedule_record_serialization() {
    let r = record(Uuid::new_v4(), "A203");

    let json = to_string(&r).expect("Failed to serialize record");
    let deserialized: ScheduleRecord = from_str(&json).expect("Failed to deserialize record");

    assert_eq!(deserialized, r);
}

#[test]
fn test_course_schedulability() {
    let mut course = Course {
        id: Uuid::new_v4(),
        name: "Compilers".to_string(),
        teacher_id: None,
        schedule: None,
        updated_at: None,
    };
    assert!(!course.is_schedulable());

    course.teacher_id = Some(Uuid::new_v4());
    assert!(course.is_schedulable());

    course.schedule = Some(record(course.teacher_id.unwrap(), "A101"));
    assert!(!course.is_schedulable());
}
