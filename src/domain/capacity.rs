//! Seat and vacancy arithmetic
//!
//! Capacity questions are answered from a seat-count snapshot taken by the
//! caller; nothing here reads storage. `max_attendees == 0` means the event
//! has no seat limit at all, which is reported as its own state and never
//! as a vacancy count.

use serde::Serialize;

use super::event::Event;
use super::registration::Registration;
use super::settings::RegistrationSettings;

impl Event {
    /// Sum of booked seats over the given registrations plus seats taken
    /// offline. Waiting-list entries never consume seats.
    pub fn registered_seats<'a>(
        &self,
        regular: impl IntoIterator<Item = &'a Registration>,
    ) -> u32 {
        let booked: u32 = regular
            .into_iter()
            .filter(|registration| registration.queue_status.consumes_seats())
            .map(Registration::seats)
            .sum();
        booked + self.offline_registration_count
    }

    /// Returns true if the event has no seat limit
    pub fn has_unlimited_vacancies(&self) -> bool {
        self.max_attendees == 0
    }

    /// Remaining free seats. Zero for unlimited events; callers must check
    /// [`Event::has_unlimited_vacancies`] first so "0 left" is never shown
    /// for them.
    pub fn vacancies(&self, registered_seats: u32) -> u32 {
        if self.has_unlimited_vacancies() {
            0
        } else {
            self.max_attendees.saturating_sub(registered_seats)
        }
    }

    /// Returns true if every seat is taken. An unlimited event is never full.
    pub fn is_full(&self, registered_seats: u32) -> bool {
        !self.has_unlimited_vacancies() && registered_seats >= self.max_attendees
    }

    /// Returns true if the minimum attendance is reached
    pub fn has_enough_registrations(&self, registered_seats: u32) -> bool {
        registered_seats >= self.min_attendees
    }

    /// Vacancy figure as shown to attendees: exact numbers only below the
    /// configured threshold
    pub fn vacancy_status(
        &self,
        registered_seats: u32,
        settings: &RegistrationSettings,
    ) -> VacancyStatus {
        if self.has_unlimited_vacancies() {
            return VacancyStatus::Unlimited;
        }

        let vacancies = self.vacancies(registered_seats);
        if vacancies == 0 {
            VacancyStatus::Full
        } else if vacancies >= settings.show_vacancies_threshold {
            VacancyStatus::Enough
        } else {
            VacancyStatus::Available(vacancies)
        }
    }
}

/// Displayable vacancy classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    Unlimited,
    /// At or above the display threshold
    Enough,
    Available(u32),
    Full,
}

impl std::fmt::Display for VacancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacancyStatus::Unlimited => write!(f, "unlimited"),
            VacancyStatus::Enough => write!(f, "enough"),
            VacancyStatus::Available(count) => write!(f, "{}", count),
            VacancyStatus::Full => write!(f, "full"),
        }
    }
}
