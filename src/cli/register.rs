//! Commands that change records

use anyhow::{anyhow, bail, Result};

use crate::domain::{
    classify_registration, is_repeat_registration, Event, EventId, QueueStatus, Registration,
    RegistrationSettings, Timestamp,
};
use crate::storage::CatalogStore;

use super::output::Output;

/// Registers seats for an event, running the full gate: eligibility,
/// repeat check, queue classification, store append
pub fn register(
    store: &CatalogStore,
    settings: &RegistrationSettings,
    id: EventId,
    seats: u32,
    attendee: Option<&str>,
    now: Timestamp,
    output: &Output,
) -> Result<()> {
    let catalog = store.load()?;
    let event = catalog
        .event(id)
        .ok_or_else(|| anyhow!("Unknown event: {}", id))?;
    let registered = catalog.registered_seats(event);

    if let Some(blocker) = event.registration_blocker(registered, settings, now) {
        bail!("registration refused: {}", blocker);
    }

    if let Some(attendee) = attendee {
        if is_repeat_registration(event, attendee, catalog.registrations_for(id)) {
            bail!(
                "'{}' is already registered and event {} does not allow multiple registrations",
                attendee,
                id
            );
        }
    }

    let queue_status = classify_registration(event, registered, seats)?;
    let mut registration =
        Registration::new(catalog.next_registration_id(), id, seats.max(1), queue_status);
    registration.attendee = attendee.map(str::to_string);

    output.verbose(&format!(
        "classified as {:?} with {} seats registered",
        queue_status, registered
    ));
    store.append_registration(&registration)?;

    match queue_status {
        QueueStatus::WaitingList => output.success(&format!(
            "Added {} seat(s) to the waiting list of event {}",
            registration.seats(),
            id
        )),
        _ => output.success(&format!(
            "Registered {} seat(s) for event {}",
            registration.seats(),
            id
        )),
    }
    Ok(())
}

/// Target of a status command
#[derive(Debug, Clone, Copy)]
pub enum StatusChange {
    Cancel,
    Confirm,
}

/// Cancels or confirms an event and writes the records back
pub fn set_status(
    store: &CatalogStore,
    id: EventId,
    change: StatusChange,
    output: &Output,
) -> Result<()> {
    let mut catalog = store.load()?;
    let event = catalog
        .event_mut(id)
        .ok_or_else(|| anyhow!("Unknown event: {}", id))?;

    match change {
        StatusChange::Cancel => event.cancel(),
        StatusChange::Confirm => event.confirm(),
    }
    let status = event.status;

    let events: Vec<&Event> = catalog.events().collect();
    store.write_events(events)?;

    output.success(&format!("Event {} is now {}", id, status));
    Ok(())
}
