//! Doctor Repository over HTTP.
//!
//! Talks to `GET {base}/doctors` and `GET {base}/doctors/{id}`. A 404 on the detail endpoint is
//! reported as `DirectoryError::NotFound`; any other non-success status as
//! `DirectoryError::UpstreamStatus`.

use super::DoctorRepository;
use crate::config::CoreConfig;
use crate::constants::DOCTORS_PATH;
use crate::doctor::Doctor;
use crate::{DirectoryError, DirectoryResult};
use reqwest::{StatusCode, Url};

#[derive(Clone, Debug)]
pub struct HttpDoctorRepository {
    client: reqwest::Client,
    base: Url,
}

impl HttpDoctorRepository {
    /// Builds a client for the repository at `cfg.doctors_url()`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidInput` if the base URL cannot carry a path, or
    /// `DirectoryError::Http` if the HTTP client cannot be built.
    pub fn new(cfg: &CoreConfig) -> DirectoryResult<Self> {
        let base = Url::parse(cfg.doctors_url()).map_err(|e| {
            DirectoryError::InvalidInput(format!("invalid doctors_url {}: {e}", cfg.doctors_url()))
        })?;
        if base.cannot_be_a_base() {
            return Err(DirectoryError::InvalidInput(format!(
                "doctors_url cannot be used as a base: {base}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.http_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    fn url(&self, segments: &[&str]) -> DirectoryResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DirectoryError::InvalidInput(format!("cannot extend {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET and returns the status with the full body.
    async fn fetch(&self, url: Url) -> DirectoryResult<(StatusCode, Vec<u8>)> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait::async_trait]
impl DoctorRepository for HttpDoctorRepository {
    async fn list_doctors(&self) -> DirectoryResult<Vec<Doctor>> {
        let url = self.url(&[DOCTORS_PATH])?;
        let (status, body) = self.fetch(url.clone()).await?;
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatus {
                status,
                url: url.to_string(),
            });
        }

        let doctors = Doctor::collection_from_json(&body)?;
        tracing::info!("fetched {} doctor(s) from {}", doctors.len(), url);
        Ok(doctors)
    }

    async fn get_doctor(&self, id: &str) -> DirectoryResult<Doctor> {
        let url = self.url(&[DOCTORS_PATH, id])?;
        let (status, body) = self.fetch(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatus {
                status,
                url: url.to_string(),
            });
        }

        Doctor::from_json(&body)
    }
}
