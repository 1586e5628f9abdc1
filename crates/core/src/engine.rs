//! # Scheduling Engine
//!
//! Assigns courses to a (teacher, classroom, weekly slot) triple without
//! double-booking teachers or classrooms.
//!
//! ## Manual assignment
//!
//! [`SchedulingEngine::schedule`] validates a caller-chosen assignment, scans
//! the teacher's and then the classroom's existing records for an overlap, and
//! commits through the store's atomic check-and-insert.
//!
//! ## Automatic assignment
//!
//! [`SchedulingEngine::auto_schedule`] walks every course that has a teacher but
//! no schedule, in store order, and gives each the first free
//! (day, window, classroom) candidate:
//!
//! 1. Days 1 through 7
//! 2. Configured windows in order
//! 3. Configured classrooms in order
//!
//! Configured classrooms the store does not know are left out of the run, so
//! automatic and manual assignment accept the same rooms.
//!
//! A course is committed as soon as a candidate is free for both its teacher
//! and the classroom; assignments made earlier in the same run are visible to
//! later courses. There is no backtracking, so the result is first-fit rather
//! than optimal, and identical inputs always give identical assignments.
//!
//! Worst case is O(courses × 7 × windows × classrooms × bookings) comparisons,
//! which suits batch runs rather than per-request use.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::SchedulerConfig,
    conflict,
    errors::{Resource, SchedError, SchedResult},
    models::{
        AutoScheduleSummary, CommitOutcome, Course, NewScheduleRecord, RecordFilter,
        ScheduleRecord, ScheduleRequest, TimeSlot,
    },
    store::ScheduleStore,
};

#[derive(Clone)]
pub struct SchedulingEngine {
    store: Arc<dyn ScheduleStore>,
    config: SchedulerConfig,
}

enum Placement {
    Placed(ScheduleRecord),
    NoFreeSlot,
    CourseGone,
}

impl SchedulingEngine {
    pub fn new(store: Arc<dyn ScheduleStore>, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a course at a caller-chosen slot and classroom.
    ///
    /// # Errors
    ///
    /// * `SchedError::InvalidInput` - malformed time, day outside 1..=7, end not
    ///   after start, or an empty classroom id
    /// * `SchedError::NotFound` - unknown course, teacher or classroom
    /// * `SchedError::Conflict` - the teacher (checked first) or the classroom
    ///   already has an overlapping record
    /// * `SchedError::Database` - the store failed
    pub async fn schedule(&self, request: ScheduleRequest) -> SchedResult<ScheduleRecord> {
        let time_slot =
            TimeSlot::parse(request.day_of_week, &request.start_time, &request.end_time)?;
        let classroom_id = request.classroom_id.trim();
        if classroom_id.is_empty() {
            return Err(SchedError::InvalidInput(
                "classroom_id must not be empty".to_string(),
            ));
        }

        debug!(
            "Scheduling course {} with teacher {} in {} at {}",
            request.course_id, request.teacher_id, classroom_id, time_slot
        );

        self.store
            .find_course(request.course_id)
            .await?
            .ok_or_else(|| course_not_found(request.course_id))?;

        if !self.store.teacher_exists(request.teacher_id).await? {
            return Err(SchedError::NotFound(format!(
                "Teacher with ID {} not found",
                request.teacher_id
            )));
        }
        if !self.store.classroom_exists(classroom_id).await? {
            return Err(SchedError::NotFound(format!(
                "Classroom {} not found",
                classroom_id
            )));
        }

        let teacher_records = self
            .store
            .find_records(&RecordFilter::teacher(request.teacher_id))
            .await?;
        if let Some(existing) = conflict::find_conflict(&teacher_records, &time_slot) {
            return Err(conflict_error(
                Resource::Teacher(request.teacher_id),
                existing,
            ));
        }

        let classroom_records = self
            .store
            .find_records(&RecordFilter::classroom(classroom_id))
            .await?;
        if let Some(existing) = conflict::find_conflict(&classroom_records, &time_slot) {
            return Err(conflict_error(
                Resource::Classroom(classroom_id.to_string()),
                existing,
            ));
        }

        let assignment = NewScheduleRecord {
            course_id: request.course_id,
            teacher_id: request.teacher_id,
            classroom_id: classroom_id.to_string(),
            time_slot,
        };

        match self.store.commit_assignment(assignment).await? {
            CommitOutcome::Committed(record) => {
                info!(
                    "Scheduled course {} in {} at {} (record {})",
                    record.course_id, record.classroom_id, record.time_slot, record.id
                );
                Ok(record)
            }
            CommitOutcome::TeacherBusy(existing) => {
                warn!("Lost a race for teacher {}", request.teacher_id);
                Err(conflict_error(
                    Resource::Teacher(request.teacher_id),
                    &existing,
                ))
            }
            CommitOutcome::ClassroomBusy(existing) => {
                warn!("Lost a race for classroom {}", classroom_id);
                Err(conflict_error(
                    Resource::Classroom(classroom_id.to_string()),
                    &existing,
                ))
            }
            CommitOutcome::CourseMissing => Err(course_not_found(request.course_id)),
        }
    }

    /// Gives every unscheduled course that has a teacher the first free
    /// candidate slot. Courses that cannot be placed are counted, not failed.
    pub async fn auto_schedule(&self) -> SchedResult<AutoScheduleSummary> {
        let courses = self.store.list_unscheduled_courses_with_teacher().await?;
        info!("Auto-scheduling {} course(s)", courses.len());

        let classrooms = self.known_classrooms().await?;
        let mut summary = AutoScheduleSummary::default();
        let mut classroom_bookings: HashMap<String, Vec<TimeSlot>> = HashMap::new();

        for course in courses {
            let Some(teacher_id) = course.teacher_id else {
                continue;
            };

            if !self.store.teacher_exists(teacher_id).await? {
                warn!(
                    "Skipping course {}: teacher {} does not exist",
                    course.id, teacher_id
                );
                summary.skipped_count += 1;
                continue;
            }

            match self
                .place_course(&course, teacher_id, &classrooms, &mut classroom_bookings)
                .await?
            {
                Placement::Placed(record) => {
                    info!(
                        "Auto-scheduled course {} in {} at {}",
                        course.id, record.classroom_id, record.time_slot
                    );
                    summary.scheduled_count += 1;
                    summary.assignments.push(record);
                }
                Placement::NoFreeSlot => {
                    debug!("No free slot for course {}", course.id);
                    summary.unscheduled_count += 1;
                }
                Placement::CourseGone => {
                    warn!("Course {} disappeared while being scheduled", course.id);
                    summary.skipped_count += 1;
                }
            }
        }

        info!(
            "Auto-scheduling finished: scheduled={}, unscheduled={}, skipped={}",
            summary.scheduled_count, summary.unscheduled_count, summary.skipped_count
        );
        Ok(summary)
    }

    /// Configured classrooms that exist in the store, in configured order.
    async fn known_classrooms(&self) -> SchedResult<Vec<String>> {
        let mut known = Vec::with_capacity(self.config.classrooms.len());
        for classroom in &self.config.classrooms {
            if self.store.classroom_exists(classroom).await? {
                known.push(classroom.clone());
            } else {
                warn!("Configured classroom {} does not exist, leaving it out", classroom);
            }
        }
        Ok(known)
    }

    async fn place_course(
        &self,
        course: &Course,
        teacher_id: Uuid,
        classrooms: &[String],
        classroom_bookings: &mut HashMap<String, Vec<TimeSlot>>,
    ) -> SchedResult<Placement> {
        let mut teacher_bookings: Vec<TimeSlot> = self
            .store
            .find_records(&RecordFilter::teacher(teacher_id))
            .await?
            .into_iter()
            .map(|r| r.time_slot)
            .collect();

        for slot in self.config.candidate_slots() {
            if is_booked(&teacher_bookings, &slot) {
                continue;
            }

            for classroom in classrooms {
                if !classroom_bookings.contains_key(classroom) {
                    let booked = self
                        .store
                        .find_records(&RecordFilter::classroom(classroom.as_str()))
                        .await?
                        .into_iter()
                        .map(|r| r.time_slot)
                        .collect();
                    classroom_bookings.insert(classroom.clone(), booked);
                }
                let room = classroom_bookings.entry(classroom.clone()).or_default();
                if is_booked(room, &slot) {
                    continue;
                }

                let assignment = NewScheduleRecord {
                    course_id: course.id,
                    teacher_id,
                    classroom_id: classroom.clone(),
                    time_slot: slot,
                };

                match self.store.commit_assignment(assignment).await? {
                    CommitOutcome::Committed(record) => {
                        room.push(record.time_slot);
                        return Ok(Placement::Placed(record));
                    }
                    CommitOutcome::TeacherBusy(existing) => {
                        warn!("Teacher {} was booked concurrently at {}", teacher_id, slot);
                        teacher_bookings.push(existing.time_slot);
                        break;
                    }
                    CommitOutcome::ClassroomBusy(existing) => {
                        warn!("Classroom {} was booked concurrently at {}", classroom, slot);
                        room.push(existing.time_slot);
                    }
                    CommitOutcome::CourseMissing => return Ok(Placement::CourseGone),
                }
            }
        }

        Ok(Placement::NoFreeSlot)
    }

    /// Every record in store order, paged by `skip` and `limit`.
    pub async fn list_schedules(
        &self,
        skip: usize,
        limit: usize,
    ) -> SchedResult<Vec<ScheduleRecord>> {
        let records = self.store.find_records(&RecordFilter::default()).await?;
        Ok(records.into_iter().skip(skip).take(limit).collect())
    }

    pub async fn teacher_schedule(&self, teacher_id: Uuid) -> SchedResult<Vec<ScheduleRecord>> {
        let records = self
            .store
            .find_records(&RecordFilter::teacher(teacher_id))
            .await?;
        Ok(records)
    }

    pub async fn classroom_schedule(&self, classroom_id: &str) -> SchedResult<Vec<ScheduleRecord>> {
        let records = self
            .store
            .find_records(&RecordFilter::classroom(classroom_id))
            .await?;
        Ok(records)
    }
}

fn is_booked(bookings: &[TimeSlot], slot: &TimeSlot) -> bool {
    bookings.iter().any(|booked| conflict::overlaps(booked, slot))
}

fn course_not_found(id: Uuid) -> SchedError {
    SchedError::NotFound(format!("Course with ID {} not found", id))
}

fn conflict_error(resource: Resource, existing: &ScheduleRecord) -> SchedError {
    SchedError::Conflict {
        resource,
        slot: existing.time_slot,
        existing: existing.id,
    }
}
