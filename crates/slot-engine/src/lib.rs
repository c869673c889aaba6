//! # slot-engine
//!
//! Appointment slot availability for clinic booking forms.
//!
//! Given a calendar date and the slots already booked for a professional on
//! that date, computes which 30-minute slots can still be offered under the
//! clinic's weekly business hours. All computations are pure and infallible;
//! only parsing caller-supplied text can fail.
//!
//! ```rust
//! use slot_engine::{compute_offerable_slots, parse_calendar_date, parse_occupied};
//!
//! let date = parse_calendar_date("2026-03-21").unwrap(); // a Saturday
//! let occupied = parse_occupied(["08:00", "20:00"]).unwrap();
//! let slots = compute_offerable_slots(date, &occupied);
//! assert_eq!(slots.len(), 7);
//! assert_eq!(slots[0].to_string(), "08:30");
//! ```
//!
//! ## Modules
//!
//! - [`availability`]: labor-slot enumeration and occupied-slot exclusion
//! - [`policy`]: weekly business hours, the clinic default and JSON loading
//! - [`slot`]: the `HH:MM` slot type and 12-hour formatting
//! - [`calendar`]: ISO date parsing without timezone shifts
//! - [`error`]: Error types

pub mod availability;
pub mod calendar;
pub mod error;
pub mod policy;
pub mod slot;

pub use availability::{
    compute_offerable_slots, compute_offerable_slots_with, day_schedule, day_schedule_with,
    enumerate_labor_slots, enumerate_labor_slots_with, parse_occupied, DaySchedule,
    OccupiedSlotSet,
};
pub use calendar::parse_calendar_date;
pub use error::SlotError;
pub use policy::{BusinessHoursPolicy, TimeRange};
pub use slot::{format_twelve_hour, TimeSlot, SLOT_MINUTES};
