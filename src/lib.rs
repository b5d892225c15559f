//! Seminars CLI - seminar booking rules with a query CLI
//!
//! Models events (single events, topics and their scheduled dates) with
//! capacity arithmetic, layered registration deadlines and a prerequisite
//! graph between topics, and answers the one question everything here
//! exists for: can somebody register for this event right now.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{
    Event, EventId, EventKind, EventStatus, QueueStatus, Registration, RegistrationSettings,
};
