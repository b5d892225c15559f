//! Event domain model
//!
//! An event record is either a self-contained single event, a topic
//! (the content template), or a date (a concrete scheduling of a topic).
//! Dates inherit all content fields from their topic; schedule and
//! registration fields are their own.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::error::DomainError;
use super::id::EventId;
use super::time::{checked, TimeSpan, Timestamp};

/// Kind of event record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A complete event with its own content and schedule
    #[default]
    SingleEvent,
    /// A content template shared by its scheduled dates
    Topic,
    /// A concrete scheduling of a topic
    Date,
}

/// Publication status of an event
///
/// Transitions are free: canceling a canceled event or confirming a
/// confirmed one is allowed and changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planned,
    Confirmed,
    Canceled,
}

impl EventStatus {
    pub fn is_canceled(&self) -> bool {
        matches!(self, EventStatus::Canceled)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, EventStatus::Confirmed)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Planned => write!(f, "planned"),
            EventStatus::Confirmed => write!(f, "confirmed"),
            EventStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::SingleEvent => write!(f, "single_event"),
            EventKind::Topic => write!(f, "topic"),
            EventKind::Date => write!(f, "date"),
        }
    }
}

/// A speaker booked for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: u32,

    pub name: String,

    /// Agreed notice period for canceling the event, in days
    #[serde(default)]
    pub cancellation_period_days: u32,
}

/// An organizer responsible for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: u32,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Lookup of event records by id, used to resolve a date's topic
pub trait EventLookup {
    fn event(&self, id: EventId) -> Option<&Event>;
}

impl EventLookup for HashMap<EventId, Event> {
    fn event(&self, id: EventId) -> Option<&Event> {
        self.get(&id)
    }
}

/// An event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    #[serde(default)]
    pub kind: EventKind,

    #[serde(default)]
    pub status: EventStatus,

    /// Own stored title; for a date the effective title comes from the topic
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaser: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,

    #[serde(default)]
    pub credit_points: u32,

    /// Regular price in euro cents, 0 = free
    #[serde(default)]
    pub price_regular: u32,

    /// Early-bird price in euro cents, 0 = none
    #[serde(default)]
    pub price_early_bird: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_methods: Vec<String>,

    #[serde(default)]
    pub(crate) schedule: TimeSpan,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) registration_begin: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) registration_deadline: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) early_bird_deadline: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) unregistration_deadline: Option<Timestamp>,

    /// Minimum attendance for the event to take place
    #[serde(default)]
    pub min_attendees: u32,

    /// Seat limit, 0 = unlimited
    #[serde(default)]
    pub max_attendees: u32,

    /// Seats taken by registrations outside this system (phone, mail)
    #[serde(default)]
    pub offline_registration_count: u32,

    #[serde(default)]
    pub needs_registration: bool,

    #[serde(default)]
    pub has_registration_queue: bool,

    #[serde(default)]
    pub allows_multiple_registrations: bool,

    /// Topics an attendee must have completed first; topics only
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub(crate) requirements: BTreeSet<EventId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<Speaker>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizers: Vec<Organizer>,

    /// The topic this date belongs to; set only when kind is `Date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_ref: Option<EventId>,
}

impl Event {
    /// Creates a new event with the given id, kind and title
    pub fn new(id: EventId, kind: EventKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            status: EventStatus::Planned,
            title: title.into(),
            description: None,
            teaser: None,
            additional_information: None,
            credit_points: 0,
            price_regular: 0,
            price_early_bird: 0,
            payment_methods: Vec::new(),
            schedule: TimeSpan::new(),
            registration_begin: None,
            registration_deadline: None,
            early_bird_deadline: None,
            unregistration_deadline: None,
            min_attendees: 0,
            max_attendees: 0,
            offline_registration_count: 0,
            needs_registration: true,
            has_registration_queue: false,
            allows_multiple_registrations: false,
            requirements: BTreeSet::new(),
            speakers: Vec::new(),
            organizers: Vec::new(),
            topic_ref: None,
        }
    }

    pub fn is_single_event(&self) -> bool {
        self.kind == EventKind::SingleEvent
    }

    pub fn is_topic(&self) -> bool {
        self.kind == EventKind::Topic
    }

    /// Returns true if this is a date with a resolvable topic.
    ///
    /// A date whose topic reference dangles or points at a non-topic is
    /// invalid and drops out of content and dependency queries.
    pub fn is_event_date(&self, events: &impl EventLookup) -> bool {
        self.kind == EventKind::Date && self.topic(events).is_some()
    }

    /// Resolves the topic record behind this date, if any
    pub fn topic<'a>(&self, events: &'a impl EventLookup) -> Option<&'a Event> {
        if self.kind != EventKind::Date {
            return None;
        }
        self.topic_ref
            .and_then(|id| events.event(id))
            .filter(|topic| topic.kind == EventKind::Topic)
    }

    /// Returns the content view, reading topic-governed fields through
    /// the linked topic for a resolvable date
    pub fn content<'a>(&'a self, events: &'a impl EventLookup) -> EventContent<'a> {
        EventContent {
            own: self,
            topic: self.topic(events),
        }
    }

    /// Own stored title, never redirected to the topic
    pub fn raw_title(&self) -> &str {
        &self.title
    }

    // --- schedule and registration dates -------------------------------

    pub fn schedule(&self) -> &TimeSpan {
        &self.schedule
    }

    pub fn set_begin_date(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.schedule.set_begin(at)
    }

    pub fn set_end_date(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.schedule.set_end(at)
    }

    pub fn begin_date(&self) -> Option<Timestamp> {
        self.schedule.begin()
    }

    pub fn end_date(&self) -> Option<Timestamp> {
        self.schedule.end()
    }

    pub fn has_begin_date(&self) -> bool {
        self.schedule.has_begin()
    }

    pub fn set_registration_begin(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.registration_begin = Some(checked(at)?);
        Ok(())
    }

    /// The moment registration opens, or None when registration is open
    /// from the start
    pub fn registration_begin(&self) -> Option<Timestamp> {
        self.registration_begin.filter(|at| *at > 0)
    }

    pub fn set_registration_deadline(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.registration_deadline = Some(checked(at)?);
        Ok(())
    }

    pub fn set_early_bird_deadline(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.early_bird_deadline = Some(checked(at)?);
        Ok(())
    }

    pub fn set_unregistration_deadline(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.unregistration_deadline = Some(checked(at)?);
        Ok(())
    }

    // --- status --------------------------------------------------------

    /// Marks the event as canceled. May be called in any state.
    pub fn cancel(&mut self) {
        self.status = EventStatus::Canceled;
    }

    /// Marks the event as confirmed. May be called in any state.
    pub fn confirm(&mut self) {
        self.status = EventStatus::Confirmed;
    }

    pub fn is_canceled(&self) -> bool {
        self.status.is_canceled()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }

    // --- topic-only mutations ------------------------------------------

    /// Replaces the accepted payment methods.
    ///
    /// Content belongs to the topic; a date must not diverge from it.
    pub fn set_payment_methods(&mut self, methods: Vec<String>) -> Result<(), DomainError> {
        if self.kind == EventKind::Date {
            return Err(DomainError::TopicOnlyOperation("set_payment_methods"));
        }
        self.payment_methods = methods;
        Ok(())
    }

    /// Sets the credit points awarded for attendance
    pub fn set_credit_points(&mut self, points: u32) -> Result<(), DomainError> {
        if self.kind == EventKind::Date {
            return Err(DomainError::TopicOnlyOperation("set_credit_points"));
        }
        self.credit_points = points;
        Ok(())
    }

    // --- relations -----------------------------------------------------

    /// Adds a prerequisite topic. Requirement edges exist between topics
    /// only; dates inherit them through their topic.
    pub fn add_requirement(&mut self, topic: EventId) -> Result<(), DomainError> {
        if self.kind != EventKind::Topic {
            return Err(DomainError::TopicOnlyOperation("add_requirement"));
        }
        self.requirements.insert(topic);
        Ok(())
    }

    /// Directly required topic ids of this record
    pub fn requirements(&self) -> &BTreeSet<EventId> {
        &self.requirements
    }

    /// The topic id this event is judged by for requirement queries:
    /// its own id for a topic, the topic's id for a resolvable date,
    /// nothing for single events and invalid dates
    pub fn requirement_scope_id(&self, events: &impl EventLookup) -> Option<EventId> {
        match self.kind {
            EventKind::Topic => Some(self.id),
            EventKind::Date => self.topic(events).map(|topic| topic.id),
            EventKind::SingleEvent => None,
        }
    }

    /// Returns the first organizer in persisted order
    pub fn first_organizer(&self) -> Result<&Organizer, DomainError> {
        self.organizers
            .first()
            .ok_or(DomainError::NoOrganizers(self.id))
    }
}

/// Read view over an event with topic-governed fields resolved
///
/// Built once per query via [`Event::content`]; holds plain references,
/// never an object cycle.
pub struct EventContent<'a> {
    own: &'a Event,
    topic: Option<&'a Event>,
}

impl<'a> EventContent<'a> {
    fn source(&self) -> &'a Event {
        self.topic.unwrap_or(self.own)
    }

    pub fn title(&self) -> &'a str {
        &self.source().title
    }

    pub fn description(&self) -> Option<&'a str> {
        self.source().description.as_deref()
    }

    pub fn teaser(&self) -> Option<&'a str> {
        self.source().teaser.as_deref()
    }

    pub fn additional_information(&self) -> Option<&'a str> {
        self.source().additional_information.as_deref()
    }

    pub fn credit_points(&self) -> u32 {
        self.source().credit_points
    }

    pub fn price_regular(&self) -> u32 {
        self.source().price_regular
    }

    pub fn price_early_bird(&self) -> u32 {
        self.source().price_early_bird
    }

    pub fn payment_methods(&self) -> &'a [String] {
        &self.source().payment_methods
    }

    /// The price a registration made at `now` pays: the early-bird price
    /// while the (date-owned) early-bird deadline has not passed and an
    /// early-bird price exists, the regular price otherwise
    pub fn applicable_price(&self, now: Timestamp) -> u32 {
        if self.own.early_bird_applies(now) && self.price_early_bird() > 0 {
            self.price_early_bird()
        } else {
            self.price_regular()
        }
    }
}
