//! Effective registration configuration
//!
//! One value per setting, resolved by the configuration layer and passed
//! into the rules as a snapshot. The domain never reads configuration
//! storage itself.

use serde::{Deserialize, Serialize};

/// Global fallbacks and feature switches for registration handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// Fallback unregistration deadline: days before the begin date.
    /// Zero disables the fallback entirely.
    pub unregistration_deadline_days_before_begin_date: u32,

    /// Whether events without a begin date accept registrations
    pub allow_registration_for_events_without_date: bool,

    /// Vacancy counts at or above this are reported as "enough" instead
    /// of an exact number
    pub show_vacancies_threshold: u32,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            unregistration_deadline_days_before_begin_date: 0,
            allow_registration_for_events_without_date: false,
            show_vacancies_threshold: 10,
        }
    }
}
