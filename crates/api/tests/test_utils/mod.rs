use std::sync::Arc;

use axum_test::TestServer;
use coursesched_api::{app, ApiState};
use coursesched_core::{MemoryStore, SchedulerConfig, SchedulingEngine};
use uuid::Uuid;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub server: TestServer,
}

impl TestContext {
    /// Server over an in-memory store that knows the default classrooms.
    pub async fn new() -> Self {
        Self::with_config(SchedulerConfig::default()).await
    }

    pub async fn with_config(config: SchedulerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        for classroom in &config.classrooms {
            store.add_classroom(classroom).await;
        }

        let engine = SchedulingEngine::new(store.clone(), config);
        let server = TestServer::new(app(Arc::new(ApiState { engine })))
            .expect("Failed to build test server");

        Self { store, server }
    }

    /// Adds a teacher and a course taught by them.
    pub async fn staffed_course(&self, teacher: &str, course: &str) -> (Uuid, Uuid) {
        let teacher_id = self.store.add_teacher(teacher).await;
        let course_id = self.store.add_course(course, Some(teacher_id)).await;
        (teacher_id, course_id)
    }
}
