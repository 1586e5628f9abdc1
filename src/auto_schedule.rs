//! One-shot batch run of automatic scheduling against the configured database.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use coursesched_api::config::{parse_log_level, scheduler_from_env};
use coursesched_core::SchedulingEngine;
use coursesched_db::{create_pool, PgScheduleStore};
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_default());
    tracing_subscriber::fmt().with_max_level(level).init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let db_pool = create_pool(&database_url).await?;

    let engine = SchedulingEngine::new(
        Arc::new(PgScheduleStore::new(db_pool)),
        scheduler_from_env()?,
    );
    let summary = engine.auto_schedule().await?;

    for record in &summary.assignments {
        info!(
            "course {} -> {} {} (teacher {})",
            record.course_id, record.classroom_id, record.time_slot, record.teacher_id
        );
    }
    println!(
        "Scheduled: {}, Unscheduled: {}, Skipped: {}",
        summary.scheduled_count, summary.unscheduled_count, summary.skipped_count
    );

    Ok(())
}
