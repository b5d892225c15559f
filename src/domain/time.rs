//! Timestamps and event time spans
//!
//! All moments are Unix seconds (`i64`). The backing record set uses `0`
//! interchangeably with "absent" for unset dates, so every query treats a
//! stored zero as unset; only strictly positive values count. Negative
//! values are rejected at the setter.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A moment in Unix seconds
pub type Timestamp = i64;

/// Validates a timestamp coming from a caller
pub(crate) fn checked(at: Timestamp) -> Result<Timestamp, DomainError> {
    if at < 0 {
        Err(DomainError::NegativeTimestamp(at))
    } else {
        Ok(at)
    }
}

/// Converts a day count into seconds for deadline offsets
pub(crate) fn days(count: u32) -> i64 {
    chrono::Duration::days(i64::from(count)).num_seconds()
}

/// Formats a timestamp for user-facing output
pub fn format_timestamp(at: Timestamp) -> String {
    match DateTime::from_timestamp(at, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => at.to_string(),
    }
}

/// Begin/end pair of an event
///
/// An explicitly stored zero is kept (it is what the record set contains)
/// but never counts as a set date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    begin: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<Timestamp>,
}

impl TimeSpan {
    /// Creates an empty span with both dates unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the begin date
    pub fn set_begin(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.begin = Some(checked(at)?);
        Ok(())
    }

    /// Sets the end date
    pub fn set_end(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.end = Some(checked(at)?);
        Ok(())
    }

    /// Unsets the begin date
    pub fn clear_begin(&mut self) {
        self.begin = None;
    }

    /// Unsets the end date
    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Returns true if a usable begin date is set
    pub fn has_begin(&self) -> bool {
        matches!(self.begin, Some(at) if at > 0)
    }

    /// Returns true if a usable end date is set
    pub fn has_end(&self) -> bool {
        matches!(self.end, Some(at) if at > 0)
    }

    /// Returns the begin date, or None when unset or zero
    pub fn begin(&self) -> Option<Timestamp> {
        self.begin.filter(|at| *at > 0)
    }

    /// Returns the end date, or None when unset or zero
    pub fn end(&self) -> Option<Timestamp> {
        self.end.filter(|at| *at > 0)
    }

    /// Returns the begin date exactly as stored, zero included
    pub fn stored_begin(&self) -> Option<Timestamp> {
        self.begin
    }

    /// Returns the end date exactly as stored, zero included
    pub fn stored_end(&self) -> Option<Timestamp> {
        self.end
    }

    /// Returns true if the span has begun at `now`
    pub fn has_started(&self, now: Timestamp) -> bool {
        matches!(self.begin(), Some(begin) if begin <= now)
    }

    /// Returns true if the span lies entirely in the past at `now`
    pub fn has_ended(&self, now: Timestamp) -> bool {
        matches!(self.end(), Some(end) if end < now)
    }

    /// Returns true if `now` falls between begin and end (inclusive)
    pub fn is_running(&self, now: Timestamp) -> bool {
        match (self.begin(), self.end()) {
            (Some(begin), Some(end)) => begin <= now && now <= end,
            _ => false,
        }
    }
}
