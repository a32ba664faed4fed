//! Doctor Repository backed by a JSON file.
//!
//! The file holds the same JSON array `GET /doctors` returns. It is re-read on every call, so the
//! repository stays stateless like its HTTP counterpart.

use super::DoctorRepository;
use crate::doctor::Doctor;
use crate::{DirectoryError, DirectoryResult};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DoctorRepository for JsonFileRepository {
    async fn list_doctors(&self) -> DirectoryResult<Vec<Doctor>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(DirectoryError::FileRead)?;
        let doctors = Doctor::collection_from_json(&bytes)?;
        tracing::debug!("read {} doctor(s) from {}", doctors.len(), self.path.display());
        Ok(doctors)
    }

    async fn get_doctor(&self, id: &str) -> DirectoryResult<Doctor> {
        self.list_doctors()
            .await?
            .into_iter()
            .find(|d| d.id.matches(id))
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn lists_doctors_from_file() {
        let file = write_fixture(
            r#"[{"id": 1, "name": "Dr A", "speciality": "Cardiology"}, {"id": "b", "name": "Dr B"}]"#,
        );
        let repo = JsonFileRepository::new(file.path());

        let doctors = repo.list_doctors().await.unwrap();

        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[1].id.to_string(), "b");
    }

    #[tokio::test]
    async fn gets_doctor_by_id() {
        let file = write_fixture(r#"[{"id": 1, "name": "Dr A"}, {"id": 2, "name": "Dr B"}]"#);
        let repo = JsonFileRepository::new(file.path());

        let doctor = repo.get_doctor("2").await.unwrap();
        assert_eq!(doctor.name, "Dr B");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let file = write_fixture(r#"[{"id": 1, "name": "Dr A"}]"#);
        let repo = JsonFileRepository::new(file.path());

        let err = repo.get_doctor("9").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("absent.json"));

        match repo.list_doctors().await {
            Err(DirectoryError::FileRead(_)) => {}
            other => panic!("expected FileRead error, got {other:?}"),
        }
    }
}
