use std::sync::Arc;

use color_eyre::eyre::Result;
use coursesched_api::config::ApiConfig;
use coursesched_core::SchedulingEngine;
use coursesched_db::{create_pool, schema::initialize_database, PgScheduleStore};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    coursesched_api::init_tracing(&config)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgScheduleStore::new(db_pool));
    let engine = SchedulingEngine::new(store, config.scheduler.clone());

    // Start API server
    coursesched_api::start_server(config, engine).await?;

    Ok(())
}
