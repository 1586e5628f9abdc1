//! # Scheduler Configuration
//!
//! The candidate space searched by automatic scheduling: the canonical time
//! windows repeated on every day of the week, crossed with a fixed, ordered
//! list of classrooms.

use crate::{
    errors::{SchedError, SchedResult},
    models::{ClockTime, TimeSlot},
};

pub const DEFAULT_CLASSROOMS: [&str; 9] = [
    "A101", "A102", "A103", "A201", "A202", "A203", "B101", "B102", "B103",
];

pub const DEFAULT_WINDOWS: [SlotWindow; 5] = [
    SlotWindow::fixed(ClockTime::hm(8, 0), ClockTime::hm(9, 40)),
    SlotWindow::fixed(ClockTime::hm(10, 0), ClockTime::hm(11, 40)),
    SlotWindow::fixed(ClockTime::hm(14, 0), ClockTime::hm(15, 40)),
    SlotWindow::fixed(ClockTime::hm(16, 0), ClockTime::hm(17, 40)),
    SlotWindow::fixed(ClockTime::hm(19, 0), ClockTime::hm(20, 40)),
];

/// A start/end pair that repeats on each day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    start: ClockTime,
    end: ClockTime,
}

impl SlotWindow {
    const fn fixed(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn new(start: ClockTime, end: ClockTime) -> SchedResult<Self> {
        // Validated once here so that every day's slot is valid too.
        TimeSlot::new(1, start, end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    fn on_day(&self, day_of_week: u8) -> SchedResult<TimeSlot> {
        TimeSlot::new(day_of_week, self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub windows: Vec<SlotWindow>,
    pub classrooms: Vec<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            classrooms: DEFAULT_CLASSROOMS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SchedulerConfig {
    /// Parses a comma-separated list of `HH:MM-HH:MM` windows.
    pub fn parse_windows(raw: &str) -> SchedResult<Vec<SlotWindow>> {
        let windows = raw
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(|w| {
                let (start, end) = w.split_once('-').ok_or_else(|| {
                    SchedError::InvalidInput(format!("'{}' is not a HH:MM-HH:MM window", w))
                })?;
                SlotWindow::new(start.trim().parse()?, end.trim().parse()?)
            })
            .collect::<SchedResult<Vec<_>>>()?;

        if windows.is_empty() {
            return Err(SchedError::InvalidInput(
                "at least one time window is required".to_string(),
            ));
        }
        Ok(windows)
    }

    /// Parses a comma-separated list of classroom codes.
    pub fn parse_classrooms(raw: &str) -> SchedResult<Vec<String>> {
        let classrooms: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if classrooms.is_empty() {
            return Err(SchedError::InvalidInput(
                "at least one classroom is required".to_string(),
            ));
        }
        Ok(classrooms)
    }

    /// Every (day, window) slot in search order: Monday first, windows in
    /// configured order within a day.
    pub fn candidate_slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        (1..=7u8).flat_map(move |day| {
            self.windows
                .iter()
                .filter_map(move |window| window.on_day(day).ok())
        })
    }
}
