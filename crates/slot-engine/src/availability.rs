//! Offerable appointment slots for one professional on one day.
//!
//! Enumerates the day's labor slots from the business-hours policy, then drops
//! the slots already booked. Both the public booking form and the client
//! booking form go through these functions, so the two can never drift apart.
//!
//! Everything here is a pure function of its arguments. Callers recompute
//! whenever the date, professional or occupied set changes, and own any caching.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calendar::weekday_name;
use crate::error::Result;
use crate::policy::{BusinessHoursPolicy, TimeRange};
use crate::slot::TimeSlot;

/// Slots already booked for a `(professional, date)` pair.
pub type OccupiedSlotSet = BTreeSet<TimeSlot>;

/// One day's availability, ready to hand to a booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Full weekday name, e.g. `"Wednesday"`.
    pub weekday: String,
    /// Every slot the policy allows on this day.
    pub labor: Vec<TimeSlot>,
    /// Labor slots not yet booked.
    pub offerable: Vec<TimeSlot>,
    /// Occupied values that fell outside the labor slots and had no effect.
    pub occupied_ignored: Vec<TimeSlot>,
}

/// Parse booked slot strings (e.g. from a booking-conflict query) into a set.
///
/// Duplicates collapse.
///
/// # Errors
/// Returns `SlotError::InvalidSlot` for the first entry that is not a valid
/// `HH:MM` slot.
pub fn parse_occupied<I, S>(entries: I) -> Result<OccupiedSlotSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().parse::<TimeSlot>())
        .collect()
}

/// All bookable slots on `date` under the clinic's business hours.
///
/// Sunday yields nothing, Saturday `08:00..=11:30`, weekdays add
/// `14:00..=17:30`. Only the weekday of `date` matters.
pub fn enumerate_labor_slots(date: NaiveDate) -> Vec<TimeSlot> {
    enumerate_labor_slots_with(BusinessHoursPolicy::clinic(), date)
}

/// [`enumerate_labor_slots`] under an explicit policy.
///
/// Every policy is validated on construction, so the slots come out ascending
/// and unique whatever policy is passed.
pub fn enumerate_labor_slots_with(policy: &BusinessHoursPolicy, date: NaiveDate) -> Vec<TimeSlot> {
    policy
        .ranges_for(date.weekday())
        .iter()
        .flat_map(TimeRange::slots)
        .collect()
}

/// Labor slots on `date` minus those in `occupied`, in ascending order.
///
/// Matching is exact equality on the slot value. Occupied slots outside
/// business hours are ignored.
pub fn compute_offerable_slots(date: NaiveDate, occupied: &OccupiedSlotSet) -> Vec<TimeSlot> {
    compute_offerable_slots_with(BusinessHoursPolicy::clinic(), date, occupied)
}

/// [`compute_offerable_slots`] under an explicit policy.
pub fn compute_offerable_slots_with(
    policy: &BusinessHoursPolicy,
    date: NaiveDate,
    occupied: &OccupiedSlotSet,
) -> Vec<TimeSlot> {
    let labor = enumerate_labor_slots_with(policy, date);
    let offerable = exclude_occupied(&labor, occupied);

    debug!(
        %date,
        labor = labor.len(),
        occupied = occupied.len(),
        offerable = offerable.len(),
        "computed offerable slots"
    );

    offerable
}

/// Labor, offerable and ignored-occupied slots for `date` in one pass.
pub fn day_schedule(date: NaiveDate, occupied: &OccupiedSlotSet) -> DaySchedule {
    day_schedule_with(BusinessHoursPolicy::clinic(), date, occupied)
}

/// [`day_schedule`] under an explicit policy.
pub fn day_schedule_with(
    policy: &BusinessHoursPolicy,
    date: NaiveDate,
    occupied: &OccupiedSlotSet,
) -> DaySchedule {
    let labor = enumerate_labor_slots_with(policy, date);
    let offerable = exclude_occupied(&labor, occupied);

    let occupied_ignored: Vec<TimeSlot> = occupied
        .iter()
        .filter(|slot| !labor.contains(*slot))
        .copied()
        .collect();
    for slot in &occupied_ignored {
        trace!(%date, %slot, "occupied slot outside business hours");
    }

    debug!(
        %date,
        labor = labor.len(),
        offerable = offerable.len(),
        ignored = occupied_ignored.len(),
        "built day schedule"
    );

    DaySchedule {
        date,
        weekday: weekday_name(date.weekday()).to_string(),
        labor,
        offerable,
        occupied_ignored,
    }
}

fn exclude_occupied(labor: &[TimeSlot], occupied: &OccupiedSlotSet) -> Vec<TimeSlot> {
    labor
        .iter()
        .filter(|slot| !occupied.contains(*slot))
        .copied()
        .collect()
}
