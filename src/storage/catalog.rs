//! In-memory event catalog
//!
//! The record snapshot one query scope runs against: events by id plus
//! their registrations. The catalog resolves topics for dates, splits
//! regular from waiting-list registrations and builds the requirement
//! graph; all rule evaluation stays in the domain layer.

use std::collections::HashMap;

use crate::domain::{
    Event, EventId, EventLookup, Registration, RegistrationId, RequirementGraph,
};

/// Snapshot of events and registrations
#[derive(Debug, Default)]
pub struct EventCatalog {
    events: HashMap<EventId, Event>,
    registrations: HashMap<EventId, Vec<Registration>>,
}

impl EventCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from plain record lists
    pub fn from_records(
        events: impl IntoIterator<Item = Event>,
        registrations: impl IntoIterator<Item = Registration>,
    ) -> Self {
        let mut catalog = Self::new();
        for event in events {
            catalog.insert_event(event);
        }
        for registration in registrations {
            catalog.insert_registration(registration);
        }
        catalog
    }

    /// Adds or replaces an event
    pub fn insert_event(&mut self, event: Event) {
        self.events.insert(event.id, event);
    }

    /// Adds a registration
    pub fn insert_registration(&mut self, registration: Registration) {
        self.registrations
            .entry(registration.event_id)
            .or_default()
            .push(registration);
    }

    /// Looks up an event by id
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Mutable lookup, used by the status commands
    pub fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(&id)
    }

    /// All events, in unspecified order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Number of events in the catalog
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the catalog holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All registrations of an event
    pub fn registrations_for(&self, id: EventId) -> &[Registration] {
        self.registrations.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Seat-consuming registrations of an event (waiting list excluded)
    pub fn regular_registrations_for(&self, id: EventId) -> Vec<&Registration> {
        self.registrations_for(id)
            .iter()
            .filter(|registration| registration.queue_status.consumes_seats())
            .collect()
    }

    /// Waiting-list registrations of an event
    pub fn queue_registrations_for(&self, id: EventId) -> Vec<&Registration> {
        self.registrations_for(id)
            .iter()
            .filter(|registration| registration.queue_status.is_waiting_list())
            .collect()
    }

    /// Registered seat count for an event, offline registrations included
    pub fn registered_seats(&self, event: &Event) -> u32 {
        event.registered_seats(self.regular_registrations_for(event.id))
    }

    /// Requirement graph over the topics in this catalog
    pub fn requirement_graph(&self) -> RequirementGraph {
        RequirementGraph::from_events(self.events.values())
    }

    /// Directly required topics of an event; a date is answered through
    /// its topic, an unresolvable date has none
    pub fn requirements_for(&self, event: &Event) -> Vec<&Event> {
        self.related_topics(event, |graph, id| graph.requirements_of(id))
    }

    /// Topics that directly require this event's topic
    pub fn dependents_for(&self, event: &Event) -> Vec<&Event> {
        self.related_topics(event, |graph, id| graph.dependents_of(id))
    }

    pub fn has_requirements(&self, event: &Event) -> bool {
        !self.requirements_for(event).is_empty()
    }

    pub fn has_dependents(&self, event: &Event) -> bool {
        !self.dependents_for(event).is_empty()
    }

    fn related_topics(
        &self,
        event: &Event,
        edges: impl Fn(&RequirementGraph, EventId) -> Vec<EventId>,
    ) -> Vec<&Event> {
        let scope = match event.requirement_scope_id(self) {
            Some(id) => id,
            None => return vec![],
        };

        edges(&self.requirement_graph(), scope)
            .into_iter()
            .filter_map(|id| self.event(id))
            .collect()
    }

    /// Next free registration id for an append
    pub fn next_registration_id(&self) -> RegistrationId {
        let highest = self
            .registrations
            .values()
            .flatten()
            .map(|registration| registration.id.as_u32())
            .max()
            .unwrap_or(0);
        RegistrationId::new(highest + 1)
    }
}

impl EventLookup for EventCatalog {
    fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }
}
