//! # Schedule Store
//!
//! The storage boundary the scheduling engine is written against. Entity
//! management (creating teachers, classrooms and courses) lives outside this
//! crate; the store only needs to answer the lookups scheduling depends on and
//! to persist assignments.

pub mod memory;

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{CommitOutcome, Course, NewScheduleRecord, RecordFilter, ScheduleRecord};

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Records matching every criterion set on `filter`, oldest first.
    async fn find_records(&self, filter: &RecordFilter) -> Result<Vec<ScheduleRecord>>;

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>>;

    async fn teacher_exists(&self, id: Uuid) -> Result<bool>;

    async fn classroom_exists(&self, id: &str) -> Result<bool>;

    /// Courses with a teacher and no schedule, in creation order.
    async fn list_unscheduled_courses_with_teacher(&self) -> Result<Vec<Course>>;

    /// Persists an assignment and points the course's cached schedule at it,
    /// as one atomic unit.
    ///
    /// Implementations must re-check for an overlapping record of the same
    /// teacher, then of the same classroom, inside that unit and refuse the
    /// write if one exists. Two callers racing for the same slot can therefore
    /// never both commit.
    async fn commit_assignment(&self, assignment: NewScheduleRecord) -> Result<CommitOutcome>;
}
