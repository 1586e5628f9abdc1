use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::ScheduleRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub teacher_id: Option<Uuid>,
    /// Most recent assignment made for this course.
    pub schedule: Option<ScheduleRecord>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn is_schedulable(&self) -> bool {
        self.teacher_id.is_some() && self.schedule.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
}
