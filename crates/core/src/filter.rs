//! Filter engine.
//!
//! Narrows a doctor collection by three free-text criteria and an optional first letter. Each
//! non-empty criterion is a case-insensitive substring test on its field; criteria combine with
//! AND. The letter test ignores a leading "Dr" honorific. Output keeps input order.

use crate::constants::{ALL_LETTERS_LABEL, ALPHABET};
use crate::doctor::{Doctor, DoctorField};
use crate::DirectoryResult;
use mib_types::Letter;
use serde::{Deserialize, Serialize};

/// Free-text filter criteria as typed by the user. Empty strings are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FilterCriteria {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub speciality: String,
    #[serde(default)]
    pub clinic_name: String,
}

impl FilterCriteria {
    pub fn get(&self, field: DoctorField) -> &str {
        match field {
            DoctorField::Name => &self.name,
            DoctorField::Speciality => &self.speciality,
            DoctorField::ClinicName => &self.clinic_name,
        }
    }

    /// Sets one criterion. Returns true if the value changed.
    pub fn set(&mut self, field: DoctorField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            DoctorField::Name => &mut self.name,
            DoctorField::Speciality => &mut self.speciality,
            DoctorField::ClinicName => &mut self.clinic_name,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.speciality.is_empty() && self.clinic_name.is_empty()
    }
}

/// Criteria prepared for repeated matching (needles lower-cased once).
#[derive(Debug, Clone)]
pub struct Matcher {
    needles: Vec<(DoctorField, String)>,
    letter: Option<Letter>,
}

impl Matcher {
    pub fn new(criteria: &FilterCriteria, letter: Option<Letter>) -> Self {
        let needles = DoctorField::ALL
            .into_iter()
            .filter(|field| !criteria.get(*field).is_empty())
            .map(|field| (field, criteria.get(field).to_lowercase()))
            .collect();
        Self { needles, letter }
    }

    /// True when the doctor satisfies every criterion.
    ///
    /// An absent field never matches a non-empty criterion.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        let fields_match = self.needles.iter().all(|(field, needle)| {
            doctor
                .field(*field)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
        });

        fields_match
            && self
                .letter
                .map_or(true, |letter| letter.starts(doctor.sort_name()))
    }
}

/// Applies criteria and letter to a collection.
///
/// Accepts anything that yields `&Doctor`, so a filtered result can be filtered again.
pub fn apply<'a, I>(doctors: I, criteria: &FilterCriteria, letter: Option<Letter>) -> Vec<&'a Doctor>
where
    I: IntoIterator<Item = &'a Doctor>,
{
    let matcher = Matcher::new(criteria, letter);
    doctors.into_iter().filter(|d| matcher.matches(d)).collect()
}

/// Reads an alphabet-bar choice. Blank or "All" (any case) clears the letter.
///
/// # Errors
///
/// Returns `DirectoryError::Letter` for anything that is not a single ASCII letter.
pub fn parse_letter_choice(raw: &str) -> DirectoryResult<Option<Letter>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_LETTERS_LABEL) {
        return Ok(None);
    }
    Ok(Some(Letter::parse(raw)?))
}

/// The alphabet bar, "All" first, paired with whether each entry is selected.
pub fn alphabet_bar(selected: Option<Letter>) -> Vec<(String, bool)> {
    std::iter::once((ALL_LETTERS_LABEL.to_string(), selected.is_none()))
        .chain(ALPHABET.iter().map(|c| {
            (
                c.to_string(),
                selected.is_some_and(|l| l.as_char() == *c),
            )
        }))
        .collect()
}
