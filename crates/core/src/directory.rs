//! Directory listing state.
//!
//! [`DirectoryState`] is the explicit state behind one directory session: the immutable doctor
//! collection, the filter criteria, the letter, the current page and the three suggestion lists.
//! Every input event goes through a method here, and the filtered view is recomputed
//! synchronously.
//!
//! Ordering rule: any change to a criterion or the letter resets the page to 1. Changing only the
//! page never touches the filtered set.

use crate::doctor::{Doctor, DoctorField};
use crate::filter::{FilterCriteria, Matcher};
use crate::paginate::{paginate, PageSize};
use crate::suggest::{suggest, Suggestions};
use crate::{DirectoryError, DirectoryResult};
use mib_types::Letter;
use std::sync::Arc;

/// A batch of list inputs, as carried by a query string or command line.
///
/// `None` leaves the current value alone. Criteria and letter are applied before the page, so a
/// page given together with a filter change is honoured.
#[derive(Debug, Clone, Default)]
pub struct DirectoryQuery {
    pub name: Option<String>,
    pub speciality: Option<String>,
    pub clinic_name: Option<String>,
    /// `Some(None)` clears the letter ("All").
    pub letter: Option<Option<Letter>>,
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
}

/// The rendered list: one page of the filtered collection.
#[derive(Debug)]
pub struct DirectoryView<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub doctors: Vec<&'a Doctor>,
}

#[derive(Debug, Clone)]
pub struct DirectoryState {
    doctors: Arc<[Doctor]>,
    criteria: FilterCriteria,
    letter: Option<Letter>,
    page: usize,
    page_size: PageSize,
    suggestions: Suggestions,
    /// Positions in `doctors` that pass the current filter.
    filtered: Vec<usize>,
}

impl DirectoryState {
    /// An empty session. The collection arrives later through [`DirectoryState::load`].
    pub fn new(page_size: PageSize) -> Self {
        Self {
            doctors: Arc::from(Vec::new()),
            criteria: FilterCriteria::default(),
            letter: None,
            page: 1,
            page_size,
            suggestions: Suggestions::default(),
            filtered: Vec::new(),
        }
    }

    /// Replaces the collection. Criteria and letter are kept and re-applied; the page resets.
    pub fn load(&mut self, doctors: impl Into<Arc<[Doctor]>>) {
        self.doctors = doctors.into();
        self.page = 1;
        self.refilter();
        tracing::info!("loaded {} doctor(s)", self.doctors.len());
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn letter(&self) -> Option<Letter> {
        self.letter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn suggestions(&self, field: DoctorField) -> &[String] {
        self.suggestions.get(field)
    }

    /// Handles typing into one filter input.
    ///
    /// Updates the criterion and recomputes that field's suggestions from the full collection.
    pub fn set_criterion(&mut self, field: DoctorField, value: impl Into<String>) {
        let value = value.into();
        let partial = value.clone();
        if self.criteria.set(field, value) {
            self.page = 1;
            self.refilter();
        }
        self.suggestions
            .set(field, suggest(&self.doctors, field, &partial));
    }

    /// Handles focus on an input: shows suggestions for its current text.
    pub fn focus(&mut self, field: DoctorField) {
        let partial = self.criteria.get(field).to_owned();
        self.suggestions
            .set(field, suggest(&self.doctors, field, &partial));
    }

    /// Picks a suggestion: the criterion becomes exactly `value` and all suggestion lists close.
    pub fn select_suggestion(&mut self, field: DoctorField, value: impl Into<String>) {
        if self.criteria.set(field, value) {
            self.page = 1;
            self.refilter();
        }
        self.suggestions.clear();
    }

    /// Picks a letter from the alphabet bar; `None` is "All". Also closes all suggestion lists.
    pub fn set_letter(&mut self, letter: Option<Letter>) {
        if self.letter != letter {
            self.letter = letter;
            self.page = 1;
            self.refilter();
        }
        self.suggestions.clear();
    }

    /// Moves to another page. The filtered set is left alone.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidPage` for page 0. Pages past the end are accepted and
    /// render empty.
    pub fn set_page(&mut self, page: usize) -> DirectoryResult<()> {
        if page == 0 {
            return Err(DirectoryError::InvalidPage("pages start at 1".into()));
        }
        self.page = page;
        Ok(())
    }

    /// Changes the page size and goes back to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        if self.page_size != page_size {
            self.page_size = page_size;
            self.page = 1;
        }
    }

    /// Escape or click outside the inputs.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Applies a batch of inputs in order: criteria, letter, page size, then page.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidPage` if the requested page is 0. The batch is checked
    /// before anything is applied, so a rejected query leaves the state untouched.
    pub fn apply_query(&mut self, query: DirectoryQuery) -> DirectoryResult<()> {
        let DirectoryQuery {
            name,
            speciality,
            clinic_name,
            letter,
            page,
            page_size,
        } = query;

        if page == Some(0) {
            return Err(DirectoryError::InvalidPage("pages start at 1".into()));
        }

        let mut changed = false;
        for (field, value) in [
            (DoctorField::Name, name),
            (DoctorField::Speciality, speciality),
            (DoctorField::ClinicName, clinic_name),
        ] {
            if let Some(value) = value {
                changed |= self.criteria.set(field, value);
            }
        }
        if let Some(letter) = letter {
            if self.letter != letter {
                self.letter = letter;
                changed = true;
            }
        }
        if changed {
            self.page = 1;
            self.refilter();
        }
        if let Some(page_size) = page_size {
            self.set_page_size(page_size);
        }
        if let Some(page) = page {
            self.page = page;
        }
        Ok(())
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The whole filtered collection in source order.
    pub fn filtered(&self) -> impl Iterator<Item = &Doctor> + '_ {
        self.filtered.iter().map(|i| &self.doctors[*i])
    }

    /// The current page of the filtered collection.
    pub fn view(&self) -> DirectoryView<'_> {
        let page = paginate(&self.filtered, self.page_size, self.page);
        DirectoryView {
            page: self.page,
            total_pages: page.total_pages,
            total_matches: self.filtered.len(),
            doctors: page.items.iter().map(|i| &self.doctors[*i]).collect(),
        }
    }

    fn refilter(&mut self) {
        let matcher = Matcher::new(&self.criteria, self.letter);
        self.filtered = self
            .doctors
            .iter()
            .enumerate()
            .filter(|(_, d)| matcher.matches(d))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            "filter {:?} letter {:?}: {} of {} doctor(s)",
            self.criteria,
            self.letter,
            self.filtered.len(),
            self.doctors.len()
        );
    }
}
