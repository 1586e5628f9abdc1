//! Overlap detection between weekly time slots.
//!
//! Slots are half-open, so a class ending at 09:40 and one starting at 09:40
//! on the same day do not conflict.

use crate::models::{ScheduleRecord, TimeSlot};

/// Returns true when both slots fall on the same day and their intervals
/// intersect.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    if a.day_of_week() != b.day_of_week() {
        return false;
    }

    let (start_a, end_a) = (a.start_time().minutes(), a.end_time().minutes());
    let (start_b, end_b) = (b.start_time().minutes(), b.end_time().minutes());

    !(end_a <= start_b || end_b <= start_a)
}

/// First record in `records` whose slot overlaps `slot`.
pub fn find_conflict<'a, I>(records: I, slot: &TimeSlot) -> Option<&'a ScheduleRecord>
where
    I: IntoIterator<Item = &'a ScheduleRecord>,
{
    records
        .into_iter()
        .find(|record| overlaps(&record.time_slot, slot))
}
