use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/scheduling", get(handlers::scheduling::list_schedules))
        .route(
            "/api/scheduling/schedule",
            post(handlers::scheduling::schedule_class),
        )
        .route(
            "/api/scheduling/auto-schedule",
            post(handlers::scheduling::auto_schedule),
        )
        .route(
            "/api/scheduling/teacher/:teacher_id",
            get(handlers::scheduling::get_teacher_schedule),
        )
        .route(
            "/api/scheduling/classroom/:classroom_id",
            get(handlers::scheduling::get_classroom_schedule),
        )
}
