//! # MIB Core
//!
//! Core logic for the MIB doctors directory.
//!
//! This crate contains the data model and the pure engines behind the directory:
//! - [`doctor`]: doctor records, normalized at the repository boundary
//! - [`filter`]: conjunctive, case-insensitive filtering plus the alphabet quick-filter
//! - [`suggest`]: per-field autocomplete lists
//! - [`paginate`]: page windows over the filtered collection
//! - [`directory`]: the session state tying the engines together
//! - [`detail`] and [`routes`]: view models and client-visible routes
//! - [`repositories`]: clients for the external Doctor Repository
//!
//! **No API concerns**: HTTP servers and terminal output belong in `api-rest` and `mib-cli`.

pub mod config;
pub mod constants;
pub mod detail;
pub mod directory;
pub mod doctor;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod repositories;
pub mod routes;
pub mod suggest;

pub use config::CoreConfig;
pub use detail::{DoctorCard, DoctorDetail};
pub use directory::{DirectoryQuery, DirectoryState, DirectoryView};
pub use doctor::{strip_honorific, Doctor, DoctorField, DoctorId};
pub use error::{DirectoryError, DirectoryResult};
pub use filter::{alphabet_bar, apply, parse_letter_choice, FilterCriteria};
pub use mib_types::{Letter, NonEmptyText};
pub use paginate::{paginate, Page, PageSize};
pub use repositories::{
    file::JsonFileRepository, http::HttpDoctorRepository, load_collection, DoctorRepository,
};
pub use routes::{parse_page, DetailRoute, ListRoute};
pub use suggest::suggest;
