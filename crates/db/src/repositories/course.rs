use crate::models::DbCourse;
use chrono::Utc;
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

const COURSE_COLUMNS: &str = "id, name, teacher_id, schedule_id, created_at, updated_at";

pub async fn get_course_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<DbCourse>> {
    let course = sqlx::query_as::<_, DbCourse>(&format!(
        "SELECT {} FROM courses WHERE id = $1",
        COURSE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(course)
}

/// Locks the course row for the rest of the transaction.
pub async fn lock_course<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM courses WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(locked.is_some())
}

pub async fn list_unscheduled_with_teacher<'e>(
    executor: impl PgExecutor<'e>,
) -> Result<Vec<DbCourse>> {
    let courses = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {}
        FROM courses
        WHERE schedule_id IS NULL AND teacher_id IS NOT NULL
        ORDER BY created_at ASC, id ASC
        "#,
        COURSE_COLUMNS
    ))
    .fetch_all(executor)
    .await?;

    Ok(courses)
}

pub async fn set_course_schedule<'e>(
    executor: impl PgExecutor<'e>,
    course_id: Uuid,
    schedule_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE courses
        SET schedule_id = $2, updated_at = $3
        WHERE id = $1
        "#,
    )
    .bind(course_id)
    .bind(schedule_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn teacher_exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM teachers WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;

    Ok(exists)
}

pub async fn classroom_exists<'e>(executor: impl PgExecutor<'e>, id: &str) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM classrooms WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;

    Ok(exists)
}

/// Registers classroom codes, leaving existing ones untouched. Returns how
/// many were new.
pub async fn ensure_classrooms<'e>(executor: impl PgExecutor<'e>, ids: &[String]) -> Result<u64> {
    let result = sqlx::query(
        "INSERT INTO classrooms (id) SELECT UNNEST($1::varchar[]) ON CONFLICT (id) DO NOTHING",
    )
    .bind(ids)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
