//! Contract errors raised by the booking rules
//!
//! These signal caller mistakes (bad arguments, operations on the wrong
//! event kind, queries that need data the event does not have). User-facing
//! refusals are not errors; they come out of the blocker messages in
//! [`crate::domain::eligibility`].

use thiserror::Error;

use super::id::EventId;
use super::time::Timestamp;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("timestamps must not be negative, got {0}")]
    NegativeTimestamp(Timestamp),

    #[error("{0} may only be called on single events and topics")]
    TopicOnlyOperation(&'static str),

    #[error("the cancellation deadline needs a begin date")]
    MissingBeginDate,

    #[error("event {0} has no organizers")]
    NoOrganizers(EventId),

    #[error("event {0} is fully booked and has no registration queue")]
    NoVacanciesLeft(EventId),
}
