//! Weekly business hours: which time ranges can be booked on each weekday.
//!
//! The clinic runs one global schedule, [`BusinessHoursPolicy::clinic`]. Other
//! schedules (a part-time professional, a holiday week) can be loaded from JSON
//! and passed to the `*_with` functions in [`crate::availability`].
//!
//! JSON shape, one array per weekday, missing days closed. `"24:00"` is
//! accepted as a range end meaning midnight:
//!
//! ```json
//! {
//!   "monday": [{"start": "08:00", "end": "12:00"}],
//!   "saturday": [{"start": "20:00", "end": "24:00"}]
//! }
//! ```
//!
//! A policy is validated whenever it is built, deserialized included: every
//! range is non-empty and each day's ranges are ascending and disjoint, so the
//! slots it enumerates are always sorted and unique.

use std::fmt;
use std::sync::LazyLock;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::weekday_name;
use crate::error::{Result, SlotError};
use crate::slot::{TimeSlot, MINUTES_PER_DAY};

const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A half-open range `[start, end)` of bookable time.
///
/// `end` is a minute of day in `1..=1440`; 1440 is midnight and reads as
/// `24:00`, so a range can cover the last slot of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct TimeRange {
    start: TimeSlot,
    end: RangeEnd,
}

impl TimeRange {
    /// # Errors
    /// Returns `SlotError::InvalidPolicy` unless `start < end`.
    pub fn new(start: TimeSlot, end: TimeSlot) -> Result<Self> {
        Self::checked(start, RangeEnd(end.minute_of_day()))
    }

    /// The range from `start` to the end of the day.
    pub fn until_midnight(start: TimeSlot) -> Self {
        Self {
            start,
            end: RangeEnd(MINUTES_PER_DAY),
        }
    }

    pub fn start(&self) -> TimeSlot {
        self.start
    }

    /// End of the range in minutes since midnight (1440 for midnight).
    pub fn end_minute(&self) -> u16 {
        self.end.0
    }

    /// Slots starting inside the range, ascending. `end` itself is excluded.
    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> {
        let end = self.end.0;
        std::iter::successors(Some(self.start), |slot| slot.next())
            .take_while(move |slot| slot.minute_of_day() < end)
    }

    fn checked(start: TimeSlot, end: RangeEnd) -> Result<Self> {
        let range = Self { start, end };
        if start.minute_of_day() >= end.0 {
            return Err(SlotError::InvalidPolicy(format!("range {} is empty", range)));
        }
        Ok(range)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Exclusive end of a range: a grid slot or `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
struct RangeEnd(u16);

impl fmt::Display for RangeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for RangeEnd {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        if value == "24:00" {
            return Ok(Self(MINUTES_PER_DAY));
        }
        let slot: TimeSlot = value.parse()?;
        Ok(Self(slot.minute_of_day()))
    }
}

impl From<RangeEnd> for String {
    fn from(end: RangeEnd) -> Self {
        end.to_string()
    }
}

/// Wire form of a range, before the non-empty check.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    start: TimeSlot,
    end: RangeEnd,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = SlotError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::checked(raw.start, raw.end)
    }
}

impl From<TimeRange> for RawRange {
    fn from(range: TimeRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Bookable ranges for each day of the week.
///
/// Fields are private so every instance has passed validation; build one with
/// [`BusinessHoursPolicy::with_day`] or deserialize it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy", into = "RawPolicy")]
pub struct BusinessHoursPolicy {
    days: [Vec<TimeRange>; 7],
}

/// Wire form of a policy, before ordering checks.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicy {
    #[serde(default)]
    sunday: Vec<RawRange>,
    #[serde(default)]
    monday: Vec<RawRange>,
    #[serde(default)]
    tuesday: Vec<RawRange>,
    #[serde(default)]
    wednesday: Vec<RawRange>,
    #[serde(default)]
    thursday: Vec<RawRange>,
    #[serde(default)]
    friday: Vec<RawRange>,
    #[serde(default)]
    saturday: Vec<RawRange>,
}

impl TryFrom<RawPolicy> for BusinessHoursPolicy {
    type Error = SlotError;

    fn try_from(raw: RawPolicy) -> Result<Self> {
        let RawPolicy {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        } = raw;

        let mut policy = Self::default();
        for (weekday, raw_ranges) in WEEK
            .into_iter()
            .zip([sunday, monday, tuesday, wednesday, thursday, friday, saturday])
        {
            let ranges = raw_ranges
                .into_iter()
                .map(|raw_range| {
                    TimeRange::try_from(raw_range).map_err(|e| {
                        SlotError::InvalidPolicy(format!(
                            "{}: {}",
                            weekday_name(weekday),
                            range_message(e)
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            policy = policy.with_day(weekday, ranges)?;
        }
        Ok(policy)
    }
}

impl From<BusinessHoursPolicy> for RawPolicy {
    fn from(policy: BusinessHoursPolicy) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] =
            policy
                .days
                .map(|ranges| ranges.into_iter().map(RawRange::from).collect::<Vec<_>>());
        Self {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }
}

fn range_message(err: SlotError) -> String {
    match err {
        SlotError::InvalidPolicy(msg) => msg,
        other => other.to_string(),
    }
}

const MORNING: TimeRange = TimeRange {
    start: TimeSlot::at(8, 0),
    end: RangeEnd(12 * 60),
};

const AFTERNOON: TimeRange = TimeRange {
    start: TimeSlot::at(14, 0),
    end: RangeEnd(18 * 60),
};

static CLINIC: LazyLock<BusinessHoursPolicy> = LazyLock::new(|| {
    let weekday = vec![MORNING, AFTERNOON];
    BusinessHoursPolicy {
        days: [
            Vec::new(),
            weekday.clone(),
            weekday.clone(),
            weekday.clone(),
            weekday.clone(),
            weekday,
            vec![MORNING],
        ],
    }
});

impl BusinessHoursPolicy {
    /// The clinic's schedule: closed Sunday, 08:00-12:00 Saturday,
    /// 08:00-12:00 and 14:00-18:00 Monday to Friday.
    pub fn clinic() -> &'static BusinessHoursPolicy {
        &CLINIC
    }

    /// A policy closed every day.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Replace the ranges of one weekday.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPolicy` naming the weekday if the ranges are
    /// not ascending and disjoint. Touching ranges (`08:00-10:00`,
    /// `10:00-11:00`) are allowed.
    pub fn with_day(mut self, weekday: Weekday, ranges: Vec<TimeRange>) -> Result<Self> {
        for pair in ranges.windows(2) {
            if pair[1].start.minute_of_day() < pair[0].end.0 {
                return Err(SlotError::InvalidPolicy(format!(
                    "{}: range {} overlaps or precedes {}",
                    weekday_name(weekday),
                    pair[1],
                    pair[0]
                )));
            }
        }
        self.days[weekday.num_days_from_sunday() as usize] = ranges;
        Ok(self)
    }

    /// Parse and validate a policy from JSON.
    ///
    /// # Errors
    /// Returns `SlotError::Json` for malformed JSON or slot strings, and
    /// `SlotError::InvalidPolicy` for empty, overlapping or unordered ranges.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPolicy = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Ranges for one weekday, ascending.
    pub fn ranges_for(&self, weekday: Weekday) -> &[TimeRange] {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn is_open(&self, weekday: Weekday) -> bool {
        !self.ranges_for(weekday).is_empty()
    }
}
