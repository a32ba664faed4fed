//! Doctor Repository clients.
//!
//! The Doctor Repository is an external read-only service with two operations: list every doctor,
//! and fetch one doctor by id. [`DoctorRepository`] abstracts it so the directory can be fed from
//! HTTP ([`http::HttpDoctorRepository`]) or from a JSON file on disk
//! ([`file::JsonFileRepository`]).
//!
//! Fetches are one-shot: no retries and no caching. [`load_collection`] is the "initial load"
//! helper, which logs a failure and yields an empty collection instead of an error.

pub mod file;
pub mod http;

use crate::doctor::Doctor;
use crate::DirectoryResult;

#[async_trait::async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Fetches the full collection.
    async fn list_doctors(&self) -> DirectoryResult<Vec<Doctor>>;

    /// Fetches one doctor.
    ///
    /// Fails with `DirectoryError::NotFound` when no record has this id.
    async fn get_doctor(&self, id: &str) -> DirectoryResult<Doctor>;
}

/// Loads the session collection once.
///
/// A failed fetch is logged and leaves the directory empty.
pub async fn load_collection(repository: &dyn DoctorRepository) -> Vec<Doctor> {
    match repository.list_doctors().await {
        Ok(doctors) => doctors,
        Err(e) => {
            tracing::error!("failed to load doctors: {}", e);
            Vec::new()
        }
    }
}
