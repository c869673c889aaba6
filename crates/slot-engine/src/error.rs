//! Error types for slot-engine boundary parsing.
//!
//! The availability computations themselves never fail; errors only arise when
//! turning caller-supplied text (dates, slot strings, policy JSON) into typed
//! values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid business-hours policy: {0}")]
    InvalidPolicy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
