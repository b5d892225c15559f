//! Read-only queries over the catalog

use anyhow::{anyhow, Result};

use crate::domain::{format_timestamp, Event, EventId, RegistrationSettings, Timestamp};
use crate::storage::{CatalogStore, EventCatalog};

use super::output::Output;

fn require_event(catalog: &EventCatalog, id: EventId) -> Result<&Event> {
    catalog
        .event(id)
        .ok_or_else(|| anyhow!("Unknown event: {}", id))
}

fn optional_date(at: Option<Timestamp>) -> String {
    at.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}

/// Formats a euro-cent amount as "12.34"
fn format_price(cents: u32) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Lists all events with their booking state
pub fn list(store: &CatalogStore, settings: &RegistrationSettings, output: &Output) -> Result<()> {
    let catalog = store.load()?;
    let mut events: Vec<&Event> = catalog.events().collect();
    events.sort_by_key(|event| event.id);

    if output.is_json() {
        let items: Vec<_> = events
            .iter()
            .map(|event| {
                let seats = catalog.registered_seats(event);
                serde_json::json!({
                    "id": event.id,
                    "kind": event.kind.to_string(),
                    "status": event.status.to_string(),
                    "title": event.content(&catalog).title(),
                    "registered_seats": seats,
                    "vacancies": event.vacancy_status(seats, settings),
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    output.row(&["ID", "KIND", "STATUS", "TITLE", "VACANCIES"]);
    for event in events {
        let seats = catalog.registered_seats(event);
        let id = event.id.to_string();
        let kind = event.kind.to_string();
        let status = event.status.to_string();
        let vacancies = event.vacancy_status(seats, settings).to_string();
        output.row(&[
            &id,
            &kind,
            &status,
            event.content(&catalog).title(),
            &vacancies,
        ]);
    }
    Ok(())
}

/// Shows the registration status of one event
pub fn status(
    store: &CatalogStore,
    settings: &RegistrationSettings,
    id: EventId,
    now: Timestamp,
    output: &Output,
) -> Result<()> {
    let catalog = store.load()?;
    let event = require_event(&catalog, id)?;

    let seats = catalog.registered_seats(event);
    let can_register = event.can_somebody_register(seats, settings, now);
    let message = event.can_somebody_register_message(seats, settings, now);
    let vacancies = event.vacancy_status(seats, settings);
    let queue_length = catalog.queue_registrations_for(event.id).len();
    let minimum_reached = event.has_enough_registrations(seats);
    let price = event.content(&catalog).applicable_price(now);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": event.id,
            "title": event.content(&catalog).title(),
            "kind": event.kind.to_string(),
            "status": event.status.to_string(),
            "can_register": can_register,
            "message": message,
            "registered_seats": seats,
            "vacancies": vacancies,
            "queue_length": queue_length,
            "minimum_reached": minimum_reached,
            "price": price,
            "begin_date": event.begin_date(),
            "end_date": event.end_date(),
        }));
        return Ok(());
    }

    let begins = optional_date(event.begin_date());
    let ends = optional_date(event.end_date());
    let seats_text = seats.to_string();
    let vacancies_text = vacancies.to_string();
    let status_text = event.status.to_string();
    let queue_text = queue_length.to_string();
    let price_text = format_price(price);

    output.row(&["Title:", event.content(&catalog).title()]);
    output.row(&["Status:", &status_text]);
    output.row(&["Begins:", &begins]);
    output.row(&["Ends:", &ends]);
    output.row(&["Registered seats:", &seats_text]);
    output.row(&["Vacancies:", &vacancies_text]);
    output.row(&["Waiting list:", &queue_text]);
    output.row(&[
        "Minimum reached:",
        if minimum_reached { "yes" } else { "no" },
    ]);
    output.row(&["Price:", &price_text]);
    if can_register {
        output.row(&["Registration:", "open"]);
    } else {
        output.row(&["Registration:", &message]);
    }
    Ok(())
}

/// Shows the deadlines of one event
pub fn deadlines(
    store: &CatalogStore,
    settings: &RegistrationSettings,
    id: EventId,
    now: Timestamp,
    output: &Output,
) -> Result<()> {
    let catalog = store.load()?;
    let event = require_event(&catalog, id)?;

    let registration = event.registration_deadline();
    let early_bird = event.early_bird_deadline();
    let unregistration = event.effective_unregistration_deadline(settings);
    // meaningless without a begin date, shown as unset then
    let cancellation = event.cancellation_deadline().ok();
    let unregistration_possible = event.is_unregistration_possible(settings, now);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": event.id,
            "registration_deadline": registration,
            "early_bird_deadline": early_bird,
            "unregistration_deadline": unregistration,
            "cancellation_deadline": cancellation,
            "unregistration_possible": unregistration_possible,
        }));
        return Ok(());
    }

    let registration = optional_date(registration);
    let early_bird = optional_date(early_bird);
    let unregistration = optional_date(unregistration);
    let cancellation = optional_date(cancellation);

    output.row(&["Registration until:", &registration]);
    output.row(&["Early bird until:", &early_bird]);
    output.row(&["Unregistration until:", &unregistration]);
    output.row(&["Cancellation until:", &cancellation]);
    output.row(&[
        "Unregistration possible:",
        if unregistration_possible { "yes" } else { "no" },
    ]);
    Ok(())
}

/// Shows prerequisite and dependent topics of one event
pub fn requirements(store: &CatalogStore, id: EventId, output: &Output) -> Result<()> {
    let catalog = store.load()?;
    let event = require_event(&catalog, id)?;

    let mut required = catalog.requirements_for(event);
    required.sort_by_key(|topic| topic.id);
    let mut dependents = catalog.dependents_for(event);
    dependents.sort_by_key(|topic| topic.id);

    if output.is_json() {
        let as_refs = |topics: &[&Event]| -> Vec<serde_json::Value> {
            topics
                .iter()
                .map(|topic| {
                    serde_json::json!({
                        "id": topic.id,
                        "title": topic.raw_title(),
                    })
                })
                .collect()
        };
        output.data(&serde_json::json!({
            "id": event.id,
            "requires": as_refs(&required),
            "required_by": as_refs(&dependents),
        }));
        return Ok(());
    }

    output.row(&["Requires:"]);
    if required.is_empty() {
        output.row(&["  (none)"]);
    }
    for topic in &required {
        let id = topic.id.to_string();
        output.row(&["  ", &id, topic.raw_title()]);
    }

    output.row(&["Required by:"]);
    if dependents.is_empty() {
        output.row(&["  (none)"]);
    }
    for topic in &dependents {
        let id = topic.id.to_string();
        output.row(&["  ", &id, topic.raw_title()]);
    }
    Ok(())
}
