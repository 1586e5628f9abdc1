use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_slot::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub classroom_id: String,
    pub time_slot: TimeSlot,
    pub created_at: DateTime<Utc>,
}

/// A manual scheduling request as received from a caller. Nothing in here is
/// trusted until the engine has validated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub classroom_id: String,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}

/// A validated assignment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleRecord {
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub classroom_id: String,
    pub time_slot: TimeSlot,
}

impl NewScheduleRecord {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> ScheduleRecord {
        ScheduleRecord {
            id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            classroom_id: self.classroom_id,
            time_slot: self.time_slot,
            created_at,
        }
    }
}

/// Selects records by teacher and/or classroom. An empty filter matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub teacher_id: Option<Uuid>,
    pub classroom_id: Option<String>,
}

impl RecordFilter {
    pub fn teacher(teacher_id: Uuid) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            classroom_id: None,
        }
    }

    pub fn classroom(classroom_id: impl Into<String>) -> Self {
        Self {
            teacher_id: None,
            classroom_id: Some(classroom_id.into()),
        }
    }

    pub fn matches(&self, record: &ScheduleRecord) -> bool {
        self.teacher_id.is_none_or(|id| record.teacher_id == id)
            && self
                .classroom_id
                .as_deref()
                .is_none_or(|id| record.classroom_id == id)
    }
}

/// Result of an atomic check-and-insert at the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(ScheduleRecord),
    /// The teacher already holds an overlapping record.
    TeacherBusy(ScheduleRecord),
    /// The classroom already holds an overlapping record.
    ClassroomBusy(ScheduleRecord),
    CourseMissing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoScheduleSummary {
    pub scheduled_count: usize,
    pub unscheduled_count: usize,
    /// Candidates whose teacher no longer exists.
    pub skipped_count: usize,
    pub assignments: Vec<ScheduleRecord>,
}
