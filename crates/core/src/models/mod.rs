pub mod course;
pub mod schedule;
pub mod time_slot;

pub use course::{Classroom, Course, Teacher};
pub use schedule::{
    AutoScheduleSummary, CommitOutcome, NewScheduleRecord, RecordFilter, ScheduleRecord,
    ScheduleRequest,
};
pub use time_slot::{ClockTime, TimeSlot};
