pub mod course;
pub mod schedule_record;
