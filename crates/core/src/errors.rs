use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::time_slot::TimeSlot;

/// The resource a conflicting booking belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Teacher(Uuid),
    Classroom(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Teacher(id) => write!(f, "teacher {}", id),
            Resource::Classroom(id) => write!(f, "classroom {}", id),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Scheduling conflict: {resource} is already booked at {slot} (record {existing})")]
    Conflict {
        resource: Resource,
        slot: TimeSlot,
        existing: Uuid,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SchedResult<T> = Result<T, SchedError>;
