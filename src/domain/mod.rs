//! Domain rules for seminar bookings
//!
//! Contains the core business logic without any I/O concerns. Everything
//! here computes over immutable snapshots handed in per call; "now" is
//! always an explicit parameter.

mod capacity;
mod deadlines;
mod eligibility;
mod error;
mod event;
mod graph;
mod id;
mod registration;
mod settings;
mod time;

pub use capacity::VacancyStatus;
pub use eligibility::RegistrationBlocker;
pub use error::DomainError;
pub use event::{Event, EventContent, EventKind, EventLookup, EventStatus, Organizer, Speaker};
pub use graph::{GraphError, RequirementGraph};
pub use id::{EventId, IdError, RegistrationId};
pub use registration::{
    classify_registration, is_repeat_registration, QueueStatus, Registration,
};
pub use settings::RegistrationSettings;
pub use time::{format_timestamp, TimeSpan, Timestamp};
