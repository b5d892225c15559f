//! Registrations and queue classification
//!
//! A registration books one or more seats on an event. Once regular
//! capacity is exhausted, new registrations overflow to the waiting list
//! if the event carries one.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::event::Event;
use super::id::{EventId, RegistrationId};

/// Queue placement of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    /// Holds a regular seat
    #[default]
    Regular,
    /// Overflow entry waiting for a seat to free up
    WaitingList,
    /// Reserved without commitment; still consumes a seat
    NonbindingReservation,
}

impl QueueStatus {
    pub fn is_waiting_list(&self) -> bool {
        matches!(self, QueueStatus::WaitingList)
    }

    /// Returns true if seats with this status count toward the
    /// registered total
    pub fn consumes_seats(&self) -> bool {
        !self.is_waiting_list()
    }
}

/// A registration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,

    pub event_id: EventId,

    /// Key identifying the registrant, used for the repeat check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee: Option<String>,

    #[serde(default)]
    pub(crate) seats: u32,

    #[serde(default)]
    pub queue_status: QueueStatus,
}

impl Registration {
    pub fn new(
        id: RegistrationId,
        event_id: EventId,
        seats: u32,
        queue_status: QueueStatus,
    ) -> Self {
        Self {
            id,
            event_id,
            attendee: None,
            seats,
            queue_status,
        }
    }

    /// Booked seats; legacy records store zero meaning one
    pub fn seats(&self) -> u32 {
        self.seats.max(1)
    }
}

/// Classifies a registration request for `requested_seats` seats.
///
/// Regular while capacity admits the whole request, waiting list once it
/// does not and the event carries a queue, rejected otherwise. The
/// decision is made from the `registered_seats` snapshot; two concurrent
/// callers can both observe the last free seat, so the caller must
/// serialize the read-classify-persist sequence.
pub fn classify_registration(
    event: &Event,
    registered_seats: u32,
    requested_seats: u32,
) -> Result<QueueStatus, DomainError> {
    let requested = requested_seats.max(1);

    if event.has_unlimited_vacancies() || registered_seats + requested <= event.max_attendees {
        Ok(QueueStatus::Regular)
    } else if event.has_registration_queue {
        Ok(QueueStatus::WaitingList)
    } else {
        Err(DomainError::NoVacanciesLeft(event.id))
    }
}

/// Returns true if `attendee` already holds a registration and the event
/// does not allow registering more than once.
///
/// This is the caller-side gate run before [`classify_registration`];
/// the classifier itself is stateless.
pub fn is_repeat_registration<'a>(
    event: &Event,
    attendee: &str,
    existing: impl IntoIterator<Item = &'a Registration>,
) -> bool {
    if event.allows_multiple_registrations {
        return false;
    }
    existing
        .into_iter()
        .any(|registration| registration.attendee.as_deref() == Some(attendee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventKind;

    fn event_with_capacity(max: u32) -> Event {
        let mut event = Event::new(EventId::new(1), EventKind::SingleEvent, "Event");
        event.max_attendees = max;
        event
    }

    fn registration(id: u32, attendee: Option<&str>) -> Registration {
        let mut reg = Registration::new(
            RegistrationId::new(id),
            EventId::new(1),
            1,
            QueueStatus::Regular,
        );
        reg.attendee = attendee.map(str::to_string);
        reg
    }

    #[test]
    fn stored_zero_seats_count_as_one() {
        let reg = Registration::new(
            RegistrationId::new(1),
            EventId::new(1),
            0,
            QueueStatus::Regular,
        );
        assert_eq!(reg.seats(), 1);
    }

    #[test]
    fn positive_seat_counts_are_kept() {
        let reg = Registration::new(
            RegistrationId::new(1),
            EventId::new(1),
            3,
            QueueStatus::Regular,
        );
        assert_eq!(reg.seats(), 3);
    }

    #[test]
    fn unlimited_capacity_always_classifies_regular() {
        let event = event_with_capacity(0);
        assert_eq!(
            classify_registration(&event, 10_000, 50).unwrap(),
            QueueStatus::Regular
        );
    }

    #[test]
    fn request_that_fits_is_regular() {
        let event = event_with_capacity(10);
        assert_eq!(
            classify_registration(&event, 7, 3).unwrap(),
            QueueStatus::Regular
        );
    }

    #[test]
    fn request_that_overflows_goes_to_the_waiting_list() {
        let mut event = event_with_capacity(10);
        event.has_registration_queue = true;

        assert_eq!(
            classify_registration(&event, 8, 3).unwrap(),
            QueueStatus::WaitingList
        );
    }

    #[test]
    fn overflow_without_a_queue_is_rejected() {
        let event = event_with_capacity(10);
        assert_eq!(
            classify_registration(&event, 10, 1).unwrap_err(),
            DomainError::NoVacanciesLeft(EventId::new(1))
        );
    }

    #[test]
    fn zero_requested_seats_are_normalized_to_one() {
        let event = event_with_capacity(5);
        // 5 registered, 0 requested: the normalized single seat overflows
        assert!(classify_registration(&event, 5, 0).is_err());
        assert_eq!(
            classify_registration(&event, 4, 0).unwrap(),
            QueueStatus::Regular
        );
    }

    #[test]
    fn repeat_registration_is_detected() {
        let event = event_with_capacity(10);
        let existing = [registration(1, Some("alice")), registration(2, None)];

        assert!(is_repeat_registration(&event, "alice", &existing));
        assert!(!is_repeat_registration(&event, "bob", &existing));
    }

    #[test]
    fn repeat_registration_allowed_when_event_permits_it() {
        let mut event = event_with_capacity(10);
        event.allows_multiple_registrations = true;
        let existing = [registration(1, Some("alice"))];

        assert!(!is_repeat_registration(&event, "alice", &existing));
    }

    #[test]
    fn queue_status_seat_accounting() {
        assert!(QueueStatus::Regular.consumes_seats());
        assert!(QueueStatus::NonbindingReservation.consumes_seats());
        assert!(!QueueStatus::WaitingList.consumes_seats());
    }

    #[test]
    fn serde_roundtrip() {
        let mut reg = Registration::new(
            RegistrationId::new(4),
            EventId::new(7),
            2,
            QueueStatus::WaitingList,
        );
        reg.attendee = Some("carol".to_string());

        let json = serde_json::to_string(&reg).unwrap();
        let parsed: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(reg, parsed);
    }
}
