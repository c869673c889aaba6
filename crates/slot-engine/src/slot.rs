//! Time-of-day slots on the 30-minute booking grid.
//!
//! A [`TimeSlot`] is always valid: hour in `0..=23`, minutes either `00` or
//! `30`. Its canonical text form is 24-hour `HH:MM`, which is also what it
//! serializes to. Equality and ordering are by time of day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Length of one bookable slot, in minutes.
pub const SLOT_MINUTES: u16 = 30;

pub(crate) const MINUTES_PER_DAY: u16 = 24 * 60;

/// A bookable time of day, e.g. `08:00` or `14:30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    minute_of_day: u16,
}

impl TimeSlot {
    /// Build a slot from a 24-hour clock reading.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSlot` if `hour > 23` or `minute` is not 0 or 30.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute >= 60 || minute % SLOT_MINUTES as u32 != 0 {
            return Err(SlotError::InvalidSlot(format!(
                "{:02}:{:02} is not on the {}-minute grid",
                hour, minute, SLOT_MINUTES
            )));
        }
        Ok(Self::at(hour as u16, minute as u16))
    }

    /// Const constructor for literals known to be on the grid.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        Self {
            minute_of_day: hour * 60 + minute,
        }
    }

    pub fn hour(self) -> u32 {
        (self.minute_of_day / 60) as u32
    }

    pub fn minute(self) -> u32 {
        (self.minute_of_day % 60) as u32
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(self) -> u16 {
        self.minute_of_day
    }

    /// The slot starting `SLOT_MINUTES` later, or `None` past 23:30.
    pub fn next(self) -> Option<Self> {
        let minute_of_day = self.minute_of_day + SLOT_MINUTES;
        (minute_of_day < MINUTES_PER_DAY).then_some(Self { minute_of_day })
    }

    /// 12-hour display form, see [`format_twelve_hour`].
    pub fn to_twelve_hour(self) -> String {
        format_twelve_hour(self)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parses `HH:MM`, or `HH:MM:SS` with zero seconds (the shape SQL `time`
/// columns come back in). Single-digit hours are rejected.
impl FromStr for TimeSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) =
            split_clock(s).ok_or_else(|| SlotError::InvalidSlot(format!("'{}' is not HH:MM", s)))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<NaiveTime> for TimeSlot {
    type Error = SlotError;

    fn try_from(time: NaiveTime) -> Result<Self> {
        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(SlotError::InvalidSlot(format!(
                "{} has a seconds component",
                time
            )));
        }
        Self::new(time.hour(), time.minute())
    }
}

impl From<TimeSlot> for NaiveTime {
    fn from(slot: TimeSlot) -> Self {
        NaiveTime::MIN + chrono::Duration::minutes(slot.minute_of_day as i64)
    }
}

/// Render a slot on the 12-hour clock with an `AM`/`PM` marker.
///
/// Hour 0 shows as `12 AM`, hour 12 as `12 PM`, afternoon hours drop 12. The
/// hour is not zero-padded, minutes always are: `08:00` → `8:00 AM`,
/// `13:30` → `1:30 PM`. Display only; comparisons always use the 24-hour
/// value.
pub fn format_twelve_hour(slot: TimeSlot) -> String {
    let hour = slot.hour();
    let display_hour = match hour {
        0 => 12,
        1..=12 => hour,
        _ => hour - 12,
    };
    let marker = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", display_hour, slot.minute(), marker)
}

fn split_clock(s: &str) -> Option<(u32, u32)> {
    let bytes = s.as_bytes();
    let hm = match bytes.len() {
        5 => bytes,
        8 if bytes[5] == b':' => {
            if two_digits(&bytes[6..8])? != 0 {
                return None;
            }
            &bytes[..5]
        }
        _ => return None,
    };
    if hm[2] != b':' {
        return None;
    }
    Some((two_digits(&hm[..2])?, two_digits(&hm[3..])?))
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [tens @ b'0'..=b'9', units @ b'0'..=b'9'] => {
            Some(((tens - b'0') * 10 + (units - b'0')) as u32)
        }
        _ => None,
    }
}
