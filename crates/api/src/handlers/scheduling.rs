//! # Scheduling Handlers
//!
//! Request/response adapters over the scheduling engine:
//!
//! - `POST /api/scheduling/schedule`: manual assignment of one course
//! - `POST /api/scheduling/auto-schedule`: first-fit assignment of every
//!   unscheduled course that has a teacher
//! - `GET /api/scheduling?skip=&limit=`: every booking, paged
//! - `GET /api/scheduling/teacher/:teacher_id` and
//!   `GET /api/scheduling/classroom/:classroom_id`: current bookings

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use coursesched_core::models::{AutoScheduleSummary, ScheduleRecord, ScheduleRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoScheduleResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: AutoScheduleSummary,
}

/// Schedules a course at the requested classroom and time.
///
/// # Errors
///
/// * 400 - malformed body, malformed time, day outside 1..=7, or end not
///   after start
/// * 404 - unknown course, teacher or classroom
/// * 409 - the teacher or the classroom is already booked at an overlapping time
#[axum::debug_handler]
pub async fn schedule_class(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleRecord>, AppError> {
    let Json(payload) = payload?;
    let record = state.engine.schedule(payload).await?;
    Ok(Json(record))
}

#[axum::debug_handler]
pub async fn auto_schedule(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<AutoScheduleResponse>, AppError> {
    let summary = state.engine.auto_schedule().await?;

    let response = AutoScheduleResponse {
        message: format!(
            "Auto-scheduling completed. Scheduled: {}, Unscheduled: {}",
            summary.scheduled_count, summary.unscheduled_count
        ),
        summary,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let Query(page) = page?;
    let records = state.engine.list_schedules(page.skip, page.limit).await?;
    Ok(Json(records))
}

#[axum::debug_handler]
pub async fn get_teacher_schedule(
    State(state): State<Arc<ApiState>>,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let records = state.engine.teacher_schedule(teacher_id).await?;
    Ok(Json(records))
}

#[axum::debug_handler]
pub async fn get_classroom_schedule(
    State(state): State<Arc<ApiState>>,
    Path(classroom_id): Path<String>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let records = state.engine.classroom_schedule(&classroom_id).await?;
    Ok(Json(records))
}
