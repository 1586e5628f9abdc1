use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::ScheduleStore;
use crate::{
    conflict,
    models::{
        Classroom, CommitOutcome, Course, NewScheduleRecord, RecordFilter, ScheduleRecord, Teacher,
    },
};

#[derive(Debug, Default)]
struct Tables {
    teachers: Vec<Teacher>,
    classrooms: Vec<Classroom>,
    courses: Vec<Course>,
    records: Vec<ScheduleRecord>,
}

/// A process-local store. Vectors keep insertion order, which is the natural
/// iteration order for courses and records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_teacher(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().await.teachers.push(Teacher {
            id,
            name: name.to_string(),
        });
        id
    }

    pub async fn add_classroom(&self, id: &str) {
        let mut tables = self.tables.lock().await;
        if !tables.classrooms.iter().any(|c| c.id == id) {
            tables.classrooms.push(Classroom { id: id.to_string() });
        }
    }

    pub async fn add_course(&self, name: &str, teacher_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().await.courses.push(Course {
            id,
            name: name.to_string(),
            teacher_id,
            schedule: None,
            updated_at: None,
        });
        id
    }

    pub async fn remove_teacher(&self, id: Uuid) {
        self.tables.lock().await.teachers.retain(|t| t.id != id);
    }

    pub async fn records(&self) -> Vec<ScheduleRecord> {
        self.tables.lock().await.records.clone()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn find_records(&self, filter: &RecordFilter) -> Result<Vec<ScheduleRecord>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>> {
        let tables = self.tables.lock().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn teacher_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.lock().await.teachers.iter().any(|t| t.id == id))
    }

    async fn classroom_exists(&self, id: &str) -> Result<bool> {
        Ok(self.tables.lock().await.classrooms.iter().any(|c| c.id == id))
    }

    async fn list_unscheduled_courses_with_teacher(&self) -> Result<Vec<Course>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .courses
            .iter()
            .filter(|c| c.is_schedulable())
            .cloned()
            .collect())
    }

    async fn commit_assignment(&self, assignment: NewScheduleRecord) -> Result<CommitOutcome> {
        let mut tables = self.tables.lock().await;

        let by_teacher = RecordFilter::teacher(assignment.teacher_id);
        let teacher_records = tables.records.iter().filter(|r| by_teacher.matches(r));
        if let Some(existing) = conflict::find_conflict(teacher_records, &assignment.time_slot) {
            return Ok(CommitOutcome::TeacherBusy(existing.clone()));
        }

        let by_classroom = RecordFilter::classroom(assignment.classroom_id.as_str());
        let classroom_records = tables.records.iter().filter(|r| by_classroom.matches(r));
        if let Some(existing) = conflict::find_conflict(classroom_records, &assignment.time_slot) {
            return Ok(CommitOutcome::ClassroomBusy(existing.clone()));
        }

        let now = Utc::now();
        let record = assignment.into_record(Uuid::new_v4(), now);

        let Some(course) = tables.courses.iter_mut().find(|c| c.id == record.course_id) else {
            return Ok(CommitOutcome::CourseMissing);
        };
        course.schedule = Some(record.clone());
        course.updated_at = Some(now);
        tables.records.push(record.clone());

        Ok(CommitOutcome::Committed(record))
    }
}
