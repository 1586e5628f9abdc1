use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{SchedError, SchedResult};

const MINUTES_PER_DAY: u16 = 24 * 60;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub(crate) const fn hm(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    pub fn from_hm(hour: u16, minute: u16) -> SchedResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(SchedError::InvalidInput(format!(
                "time {:02}:{:02} is outside 00:00-23:59",
                hour, minute
            )));
        }
        Ok(Self::hm(hour, minute))
    }

    pub fn from_minutes(minutes: u16) -> SchedResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SchedError::InvalidInput(format!(
                "{} minutes is past the end of the day",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedError::InvalidInput(format!("'{}' is not a HH:MM time", s));

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }

        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A weekly recurring meeting: a day (1 = Monday .. 7 = Sunday) and a
/// half-open `[start_time, end_time)` interval on that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotFields")]
pub struct TimeSlot {
    day_of_week: u8,
    start_time: ClockTime,
    end_time: ClockTime,
}

#[derive(Deserialize)]
struct TimeSlotFields {
    day_of_week: i64,
    start_time: ClockTime,
    end_time: ClockTime,
}

impl TryFrom<TimeSlotFields> for TimeSlot {
    type Error = SchedError;

    fn try_from(fields: TimeSlotFields) -> Result<Self, Self::Error> {
        let day = check_day(fields.day_of_week)?;
        Self::new(day, fields.start_time, fields.end_time)
    }
}

fn check_day(day_of_week: i64) -> SchedResult<u8> {
    match u8::try_from(day_of_week) {
        Ok(day @ 1..=7) => Ok(day),
        _ => Err(SchedError::InvalidInput(format!(
            "day_of_week must be between 1 and 7, got {}",
            day_of_week
        ))),
    }
}

impl TimeSlot {
    pub fn new(day_of_week: u8, start_time: ClockTime, end_time: ClockTime) -> SchedResult<Self> {
        check_day(day_of_week.into())?;
        if end_time <= start_time {
            return Err(SchedError::InvalidInput(format!(
                "end_time {} must be after start_time {}",
                end_time, start_time
            )));
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Builds a slot from caller-supplied values, validating all of them.
    pub fn parse(day_of_week: i64, start_time: &str, end_time: &str) -> SchedResult<Self> {
        let day = check_day(day_of_week)?;
        Self::new(day, start_time.parse()?, end_time.parse()?)
    }

    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    pub fn end_time(&self) -> ClockTime {
        self.end_time
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        crate::conflict::overlaps(self, other)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            WEEKDAYS[usize::from(self.day_of_week - 1)],
            self.start_time,
            self.end_time
        )
    }
}
