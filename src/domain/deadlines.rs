//! Deadline resolution
//!
//! Every check takes `now` as an explicit parameter; the domain never
//! consults a clock. Per-event dates win over configured fallbacks.

use super::error::DomainError;
use super::event::Event;
use super::settings::RegistrationSettings;
use super::time::{days, Timestamp};

impl Event {
    /// Latest moment to register: the explicit deadline if set, the begin
    /// date otherwise, unset when the event has neither
    pub fn registration_deadline(&self) -> Option<Timestamp> {
        self.registration_deadline
            .filter(|at| *at > 0)
            .or_else(|| self.begin_date())
    }

    /// The early-bird cutoff. Explicit only, no fallback.
    pub fn early_bird_deadline(&self) -> Option<Timestamp> {
        self.early_bird_deadline.filter(|at| *at > 0)
    }

    /// Returns true if a registration made at `now` still gets the
    /// early-bird price
    pub fn early_bird_applies(&self, now: Timestamp) -> bool {
        matches!(self.early_bird_deadline(), Some(deadline) if now < deadline)
    }

    /// Latest moment an attendee may unregister: the event's own deadline
    /// if set, else the begin date minus the configured day offset (both
    /// must exist and be non-zero), else unset. Unset means
    /// unregistration is never possible.
    pub fn effective_unregistration_deadline(
        &self,
        settings: &RegistrationSettings,
    ) -> Option<Timestamp> {
        if let Some(own) = self.unregistration_deadline.filter(|at| *at > 0) {
            return Some(own);
        }

        let days_before = settings.unregistration_deadline_days_before_begin_date;
        if days_before == 0 {
            return None;
        }
        self.begin_date().map(|begin| begin - days(days_before))
    }

    /// Returns true if an attendee may still unregister at `now`.
    /// Queue state plays no role here.
    pub fn is_unregistration_possible(
        &self,
        settings: &RegistrationSettings,
        now: Timestamp,
    ) -> bool {
        if !self.needs_registration {
            return false;
        }
        matches!(
            self.effective_unregistration_deadline(settings),
            Some(deadline) if now <= deadline
        )
    }

    /// Latest moment the organizer may cancel without breaking a speaker
    /// agreement: the begin date minus the longest speaker notice period.
    /// Only meaningful for dated events.
    pub fn cancellation_deadline(&self) -> Result<Timestamp, DomainError> {
        let begin = self.begin_date().ok_or(DomainError::MissingBeginDate)?;
        let notice_days = self
            .speakers
            .iter()
            .map(|speaker| speaker.cancellation_period_days)
            .max()
            .unwrap_or(0);
        Ok(begin - days(notice_days))
    }
}
