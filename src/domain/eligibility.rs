//! Registration eligibility
//!
//! Answers "can somebody register for this event right now" with exactly
//! one deterministic verdict. The blocker checks run in a fixed order and
//! the first match wins; its display text is the user-facing refusal.

use serde::Serialize;

use super::event::Event;
use super::settings::RegistrationSettings;
use super::time::{format_timestamp, Timestamp};

/// Why nobody can register for an event at the moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationBlocker {
    EventCanceled,
    /// The event has no begin date and dateless registration is disabled
    NoDate,
    /// The event has begun or already lies in the past
    RegistrationClosed,
    NoRegistrationNeeded,
    /// Fully booked and no waiting list to overflow into
    NoVacancies,
    /// The registration window opens at the given moment
    OpensOn(Timestamp),
}

impl std::fmt::Display for RegistrationBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationBlocker::EventCanceled => write!(f, "event canceled"),
            RegistrationBlocker::NoDate => write!(f, "no date"),
            RegistrationBlocker::RegistrationClosed => write!(f, "registration closed"),
            RegistrationBlocker::NoRegistrationNeeded => write!(f, "no registration necessary"),
            RegistrationBlocker::NoVacancies => write!(f, "no vacancies"),
            RegistrationBlocker::OpensOn(at) => {
                write!(f, "registration opens on {}", format_timestamp(*at))
            }
        }
    }
}

impl Event {
    /// Returns the first blocker preventing registration at `now`, or
    /// None when registration is currently allowed
    pub fn registration_blocker(
        &self,
        registered_seats: u32,
        settings: &RegistrationSettings,
        now: Timestamp,
    ) -> Option<RegistrationBlocker> {
        if self.is_canceled() {
            return Some(RegistrationBlocker::EventCanceled);
        }

        if !self.has_begin_date() && !settings.allow_registration_for_events_without_date {
            return Some(RegistrationBlocker::NoDate);
        }

        if self.registration_window_closed(now) {
            return Some(RegistrationBlocker::RegistrationClosed);
        }

        if !self.needs_registration {
            return Some(RegistrationBlocker::NoRegistrationNeeded);
        }

        if self.is_full(registered_seats) && !self.has_registration_queue {
            return Some(RegistrationBlocker::NoVacancies);
        }

        if let Some(opens) = self.registration_begin() {
            if opens > now {
                return Some(RegistrationBlocker::OpensOn(opens));
            }
        }

        None
    }

    /// Returns true if somebody may register at `now`
    pub fn can_somebody_register(
        &self,
        registered_seats: u32,
        settings: &RegistrationSettings,
        now: Timestamp,
    ) -> bool {
        self.registration_blocker(registered_seats, settings, now)
            .is_none()
    }

    /// User-facing refusal text, empty when registration is allowed
    pub fn can_somebody_register_message(
        &self,
        registered_seats: u32,
        settings: &RegistrationSettings,
        now: Timestamp,
    ) -> String {
        self.registration_blocker(registered_seats, settings, now)
            .map(|blocker| blocker.to_string())
            .unwrap_or_default()
    }

    /// A begin date in the past closes registration, as does an event
    /// currently running (begin reached, end not yet passed)
    fn registration_window_closed(&self, now: Timestamp) -> bool {
        match self.begin_date() {
            Some(begin) => begin < now || self.schedule().is_running(now),
            None => false,
        }
    }
}
