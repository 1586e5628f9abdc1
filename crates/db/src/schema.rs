use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create teachers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create classrooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classrooms (
            id VARCHAR(64) PRIMARY KEY,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create courses table; schedule_id gets its foreign key below
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            teacher_id UUID NULL REFERENCES teachers(id),
            schedule_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_records table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_records (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            course_id UUID NOT NULL REFERENCES courses(id),
            teacher_id UUID NOT NULL,
            classroom_id VARCHAR(64) NOT NULL,
            day_of_week SMALLINT NOT NULL,
            start_minute SMALLINT NOT NULL,
            end_minute SMALLINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day CHECK (day_of_week BETWEEN 1 AND 7),
            CONSTRAINT valid_minutes CHECK (start_minute >= 0 AND end_minute < 1440),
            CONSTRAINT valid_time_range CHECK (end_minute > start_minute)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        DO $$
        BEGIN
            IF NOT EXISTS (
                SELECT 1 FROM pg_constraint WHERE conname = 'courses_schedule_id_fkey'
            ) THEN
                ALTER TABLE courses
                    ADD CONSTRAINT courses_schedule_id_fkey
                    FOREIGN KEY (schedule_id) REFERENCES schedule_records(id);
            END IF;
        END
        $$;
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_schedule_records_teacher_day ON schedule_records(teacher_id, day_of_week)",
        "CREATE INDEX IF NOT EXISTS idx_schedule_records_classroom_day ON schedule_records(classroom_id, day_of_week)",
        "CREATE INDEX IF NOT EXISTS idx_courses_unscheduled ON courses(created_at) WHERE schedule_id IS NULL AND teacher_id IS NOT NULL",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
