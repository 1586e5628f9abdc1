use chrono::{DateTime, Utc};
use coursesched_core::models::{ClockTime, Course, ScheduleRecord, TimeSlot};
use eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub classroom_id: String,
    pub day_of_week: i16,
    pub start_minute: i16,
    pub end_minute: i16,
    pub created_at: DateTime<Utc>,
}

impl DbScheduleRecord {
    pub fn into_record(self) -> Result<ScheduleRecord> {
        let minute = |m: i16| -> Result<ClockTime> {
            let m = u16::try_from(m).map_err(|_| eyre!("negative minute value {}", m))?;
            Ok(ClockTime::from_minutes(m)?)
        };
        let day = u8::try_from(self.day_of_week)
            .map_err(|_| eyre!("day_of_week {} out of range", self.day_of_week))?;

        let time_slot = TimeSlot::new(day, minute(self.start_minute)?, minute(self.end_minute)?)
            .wrap_err_with(|| format!("schedule record {} holds an invalid slot", self.id))?;

        Ok(ScheduleRecord {
            id: self.id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            classroom_id: self.classroom_id,
            time_slot,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourse {
    pub id: Uuid,
    pub name: String,
    pub teacher_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DbCourse {
    pub fn into_course(self, schedule: Option<ScheduleRecord>) -> Course {
        Course {
            id: self.id,
            name: self.name,
            teacher_id: self.teacher_id,
            schedule,
            updated_at: self.updated_at,
        }
    }
}
