//! PostgreSQL-backed [`ScheduleStore`].
//!
//! Assignments are committed in a single transaction that:
//!
//! 1. takes transaction-scoped advisory locks on the teacher, then the classroom
//! 2. locks the course row
//! 3. re-checks for overlapping teacher and classroom records
//! 4. inserts the record and points `courses.schedule_id` at it
//!
//! Writers for the same teacher or classroom are serialized by step 1, so the
//! overlap check in step 3 cannot be invalidated before the insert lands.

use async_trait::async_trait;
use coursesched_core::{
    models::{CommitOutcome, Course, NewScheduleRecord, RecordFilter, ScheduleRecord},
    store::ScheduleStore,
};
use eyre::Result;
use tracing::debug;
use uuid::Uuid;

use crate::{
    DbPool,
    models::DbScheduleRecord,
    repositories::{
        course,
        schedule_record::{self, Booker},
    },
};

#[derive(Debug, Clone)]
pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn into_records(rows: Vec<DbScheduleRecord>) -> Result<Vec<ScheduleRecord>> {
    rows.into_iter().map(DbScheduleRecord::into_record).collect()
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn find_records(&self, filter: &RecordFilter) -> Result<Vec<ScheduleRecord>> {
        let rows = schedule_record::find_records(&self.pool, filter).await?;
        into_records(rows)
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>> {
        let Some(row) = course::get_course_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let schedule = match row.schedule_id {
            Some(schedule_id) => schedule_record::get_record_by_id(&self.pool, schedule_id)
                .await?
                .map(DbScheduleRecord::into_record)
                .transpose()?,
            None => None,
        };

        Ok(Some(row.into_course(schedule)))
    }

    async fn teacher_exists(&self, id: Uuid) -> Result<bool> {
        course::teacher_exists(&self.pool, id).await
    }

    async fn classroom_exists(&self, id: &str) -> Result<bool> {
        course::classroom_exists(&self.pool, id).await
    }

    async fn list_unscheduled_courses_with_teacher(&self) -> Result<Vec<Course>> {
        let rows = course::list_unscheduled_with_teacher(&self.pool).await?;
        Ok(rows.into_iter().map(|row| row.into_course(None)).collect())
    }

    async fn commit_assignment(&self, assignment: NewScheduleRecord) -> Result<CommitOutcome> {
        let mut tx = self.pool.begin().await?;

        schedule_record::lock_booker(&mut *tx, Booker::Teacher(assignment.teacher_id)).await?;
        schedule_record::lock_booker(&mut *tx, Booker::Classroom(&assignment.classroom_id))
            .await?;

        if !course::lock_course(&mut *tx, assignment.course_id).await? {
            return Ok(CommitOutcome::CourseMissing);
        }

        let slot = assignment.time_slot;
        if let Some(existing) = schedule_record::find_overlapping(
            &mut *tx,
            Booker::Teacher(assignment.teacher_id),
            &slot,
        )
        .await?
        {
            debug!("Commit refused: teacher {} busy at {}", assignment.teacher_id, slot);
            return Ok(CommitOutcome::TeacherBusy(existing.into_record()?));
        }
        if let Some(existing) = schedule_record::find_overlapping(
            &mut *tx,
            Booker::Classroom(&assignment.classroom_id),
            &slot,
        )
        .await?
        {
            debug!("Commit refused: classroom {} busy at {}", assignment.classroom_id, slot);
            return Ok(CommitOutcome::ClassroomBusy(existing.into_record()?));
        }

        let row = schedule_record::insert_record(&mut *tx, &assignment).await?;
        course::set_course_schedule(&mut *tx, assignment.course_id, row.id).await?;
        tx.commit().await?;

        Ok(CommitOutcome::Committed(row.into_record()?))
    }
}
