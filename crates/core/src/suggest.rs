//! Suggestion engine.
//!
//! Produces the autocomplete list for one field from the full collection. Values are prefix
//! matched case-insensitively, upper-cased for display, deduplicated on that display form, and kept
//! in first-occurrence order.
//!
//! An empty partial shows every distinct value for speciality and clinic ("browse all"), but
//! nothing for name.

use crate::doctor::{Doctor, DoctorField};
use std::collections::HashSet;

pub fn suggest(doctors: &[Doctor], field: DoctorField, partial: &str) -> Vec<String> {
    if partial.is_empty() && field == DoctorField::Name {
        return Vec::new();
    }

    let prefix = partial.to_lowercase();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for value in doctors.iter().filter_map(|d| d.field(field)) {
        if !value.to_lowercase().starts_with(&prefix) {
            continue;
        }
        let shown = value.to_uppercase();
        if seen.insert(shown.clone()) {
            suggestions.push(shown);
        }
    }

    tracing::debug!(
        "{} suggestion(s) for {} starting with {:?}",
        suggestions.len(),
        field,
        partial
    );
    suggestions
}

/// The three suggestion lists shown next to the filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    name: Vec<String>,
    speciality: Vec<String>,
    clinic_name: Vec<String>,
}

impl Suggestions {
    pub fn get(&self, field: DoctorField) -> &[String] {
        match field {
            DoctorField::Name => &self.name,
            DoctorField::Speciality => &self.speciality,
            DoctorField::ClinicName => &self.clinic_name,
        }
    }

    pub fn set(&mut self, field: DoctorField, values: Vec<String>) {
        match field {
            DoctorField::Name => self.name = values,
            DoctorField::Speciality => self.speciality = values,
            DoctorField::ClinicName => self.clinic_name = values,
        }
    }

    /// Dismisses every list at once.
    pub fn clear(&mut self) {
        self.name.clear();
        self.speciality.clear();
        self.clinic_name.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.speciality.is_empty() && self.clinic_name.is_empty()
    }
}
