//! # API Configuration Module
//!
//! Loads the server and scheduler configuration from environment variables,
//! with defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `SCHEDULER_TIME_SLOTS`: Comma-separated `HH:MM-HH:MM` windows for auto-scheduling
//! - `SCHEDULER_CLASSROOMS`: Comma-separated classroom codes for auto-scheduling

use coursesched_core::SchedulerConfig;
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the scheduling API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Candidate space for automatic scheduling
    pub scheduler: SchedulerConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - SCHEDULER_TIME_SLOTS or SCHEDULER_CLASSROOMS is set but empty or malformed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            scheduler: scheduler_from_env()?,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reads the scheduler overrides, falling back to the built-in candidate space.
pub fn scheduler_from_env() -> Result<SchedulerConfig> {
    let mut scheduler = SchedulerConfig::default();

    if let Ok(raw) = env::var("SCHEDULER_TIME_SLOTS") {
        scheduler.windows =
            SchedulerConfig::parse_windows(&raw).wrap_err("Invalid SCHEDULER_TIME_SLOTS value")?;
    }
    if let Ok(raw) = env::var("SCHEDULER_CLASSROOMS") {
        scheduler.classrooms = SchedulerConfig::parse_classrooms(&raw)
            .wrap_err("Invalid SCHEDULER_CLASSROOMS value")?;
    }

    Ok(scheduler)
}

pub fn parse_log_level(raw: &str) -> Level {
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
