use crate::models::DbScheduleRecord;
use chrono::Utc;
use coursesched_core::models::{NewScheduleRecord, RecordFilter, TimeSlot};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Which column an overlap lookup is keyed on.
pub enum Booker<'a> {
    Teacher(Uuid),
    Classroom(&'a str),
}

pub async fn find_records<'e>(
    executor: impl PgExecutor<'e>,
    filter: &RecordFilter,
) -> Result<Vec<DbScheduleRecord>> {
    let records = sqlx::query_as::<_, DbScheduleRecord>(
        r#"
        SELECT id, course_id, teacher_id, classroom_id, day_of_week, start_minute, end_minute, created_at
        FROM schedule_records
        WHERE ($1::uuid IS NULL OR teacher_id = $1)
          AND ($2::varchar IS NULL OR classroom_id = $2)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(filter.teacher_id)
    .bind(filter.classroom_id.as_deref())
    .fetch_all(executor)
    .await?;

    Ok(records)
}

pub async fn get_record_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<DbScheduleRecord>> {
    let record = sqlx::query_as::<_, DbScheduleRecord>(
        r#"
        SELECT id, course_id, teacher_id, classroom_id, day_of_week, start_minute, end_minute, created_at
        FROM schedule_records
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(record)
}

/// Oldest record of `booker` whose slot overlaps `slot` (half-open intervals).
pub async fn find_overlapping<'e>(
    executor: impl PgExecutor<'e>,
    booker: Booker<'_>,
    slot: &TimeSlot,
) -> Result<Option<DbScheduleRecord>> {
    let (teacher_id, classroom_id) = match booker {
        Booker::Teacher(id) => (Some(id), None),
        Booker::Classroom(id) => (None, Some(id)),
    };

    let record = sqlx::query_as::<_, DbScheduleRecord>(
        r#"
        SELECT id, course_id, teacher_id, classroom_id, day_of_week, start_minute, end_minute, created_at
        FROM schedule_records
        WHERE ($1::uuid IS NULL OR teacher_id = $1)
          AND ($2::varchar IS NULL OR classroom_id = $2)
          AND day_of_week = $3
          AND start_minute < $5
          AND end_minute > $4
        ORDER BY created_at ASC, id ASC
        LIMIT 1
        "#,
    )
    .bind(teacher_id)
    .bind(classroom_id)
    .bind(i16::from(slot.day_of_week()))
    .bind(minutes(slot.start_time().minutes())?)
    .bind(minutes(slot.end_time().minutes())?)
    .fetch_optional(executor)
    .await?;

    Ok(record)
}

pub async fn insert_record<'e>(
    executor: impl PgExecutor<'e>,
    assignment: &NewScheduleRecord,
) -> Result<DbScheduleRecord> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let slot = &assignment.time_slot;

    tracing::debug!(
        "Inserting schedule record: id={}, course_id={}, classroom_id={}",
        id, assignment.course_id, assignment.classroom_id
    );

    let record = sqlx::query_as::<_, DbScheduleRecord>(
        r#"
        INSERT INTO schedule_records
            (id, course_id, teacher_id, classroom_id, day_of_week, start_minute, end_minute, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, course_id, teacher_id, classroom_id, day_of_week, start_minute, end_minute, created_at
        "#,
    )
    .bind(id)
    .bind(assignment.course_id)
    .bind(assignment.teacher_id)
    .bind(&assignment.classroom_id)
    .bind(i16::from(slot.day_of_week()))
    .bind(minutes(slot.start_time().minutes())?)
    .bind(minutes(slot.end_time().minutes())?)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(record)
}

/// Serializes writers per teacher or classroom until the enclosing
/// transaction ends.
pub async fn lock_booker<'e>(executor: impl PgExecutor<'e>, booker: Booker<'_>) -> Result<()> {
    let key = match booker {
        Booker::Teacher(id) => format!("teacher:{}", id),
        Booker::Classroom(id) => format!("classroom:{}", id),
    };

    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(key)
        .execute(executor)
        .await?;

    Ok(())
}

fn minutes(value: u16) -> Result<i16> {
    i16::try_from(value).map_err(|_| eyre::eyre!("Minute of day out of range: {}", value))
}
