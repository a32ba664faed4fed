//! Doctor records as served by the Doctor Repository.
//!
//! Records are normalized at the boundary: optional fields that arrive absent, `null`, empty or
//! blank become `None`, and scalar values of the wrong JSON type are rendered to text instead of
//! failing. Everything downstream (filter, suggestions, pagination, view models) works with
//! explicit `Option`s.

use crate::{DirectoryError, DirectoryResult};
use mib_types::NonEmptyText;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque doctor identifier. The repository may send a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoctorId {
    Number(i64),
    Text(String),
}

impl DoctorId {
    /// Compares against an identifier taken from a route or command line.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            DoctorId::Number(n) => raw.trim().parse::<i64>().is_ok_and(|r| r == *n),
            DoctorId::Text(s) => s == raw,
        }
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoctorId::Number(n) => write!(f, "{n}"),
            DoctorId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for DoctorId {
    fn from(value: i64) -> Self {
        DoctorId::Number(value)
    }
}

impl From<&str> for DoctorId {
    fn from(value: &str) -> Self {
        DoctorId::Text(value.to_owned())
    }
}

/// The three fields a user can filter and get suggestions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DoctorField {
    Name,
    Speciality,
    ClinicName,
}

impl DoctorField {
    pub const ALL: [DoctorField; 3] = [
        DoctorField::Name,
        DoctorField::Speciality,
        DoctorField::ClinicName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DoctorField::Name => "name",
            DoctorField::Speciality => "speciality",
            DoctorField::ClinicName => "clinic_name",
        }
    }
}

impl std::fmt::Display for DoctorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DoctorField {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(DoctorField::Name),
            "speciality" | "specialty" => Ok(DoctorField::Speciality),
            "clinic_name" | "clinic" => Ok(DoctorField::ClinicName),
            other => Err(DirectoryError::InvalidInput(format!(
                "unknown field {other:?} (expected name, speciality or clinic_name)"
            ))),
        }
    }
}

/// A single doctor, read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub speciality: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub clinic_name: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address_1: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address_2: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address_3: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address_4: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<NonEmptyText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub more_info: Option<NonEmptyText>,
}

impl Doctor {
    /// Creates a doctor with only an id and a name. Mostly useful for fixtures.
    pub fn new(id: impl Into<DoctorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into().trim().to_string(),
            speciality: None,
            clinic_name: None,
            image_url: None,
            address_1: None,
            address_2: None,
            address_3: None,
            address_4: None,
            email: None,
            more_info: None,
        }
    }

    pub fn with_speciality(mut self, speciality: &str) -> Self {
        self.speciality = NonEmptyText::optional(speciality);
        self
    }

    pub fn with_clinic(mut self, clinic_name: &str) -> Self {
        self.clinic_name = NonEmptyText::optional(clinic_name);
        self
    }

    /// Value of a filterable field, or `None` when the field is absent.
    pub fn field(&self, field: DoctorField) -> Option<&str> {
        match field {
            DoctorField::Name => Some(self.name.as_str()).filter(|n| !n.is_empty()),
            DoctorField::Speciality => self.speciality.as_ref().map(NonEmptyText::as_str),
            DoctorField::ClinicName => self.clinic_name.as_ref().map(NonEmptyText::as_str),
        }
    }

    /// The name with any leading "Dr" honorific removed.
    pub fn sort_name(&self) -> &str {
        strip_honorific(&self.name)
    }

    /// Non-empty address lines in order.
    pub fn address_lines(&self) -> impl Iterator<Item = &str> {
        [
            &self.address_1,
            &self.address_2,
            &self.address_3,
            &self.address_4,
        ]
        .into_iter()
        .flatten()
        .map(NonEmptyText::as_str)
    }

    /// Parses one record.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Deserialization` if the body is not a doctor object.
    pub fn from_json(bytes: &[u8]) -> DirectoryResult<Self> {
        serde_json::from_slice(bytes).map_err(DirectoryError::Deserialization)
    }

    /// Parses a collection.
    ///
    /// The body must be a JSON array. Individual entries that cannot be read as a doctor (for
    /// example, no usable `id`) are logged and skipped so that one bad record does not hide the
    /// rest of the directory.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Deserialization` if the body is not a JSON array.
    pub fn collection_from_json(bytes: &[u8]) -> DirectoryResult<Vec<Self>> {
        let entries: Vec<Value> =
            serde_json::from_slice(bytes).map_err(DirectoryError::Deserialization)?;

        let mut doctors = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Doctor>(entry) {
                Ok(doctor) => doctors.push(doctor),
                Err(e) => tracing::warn!("skipping doctor record {}: {}", index, e),
            }
        }
        Ok(doctors)
    }
}

/// Removes a leading "Dr" (any case) followed by whitespace.
///
/// "Dr. Jane" is left alone: only whitespace ends the honorific.
pub fn strip_honorific(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 2 && bytes[..2].eq_ignore_ascii_case(b"dr") {
        let rest = &name[2..];
        let stripped = rest.trim_start();
        if stripped.len() < rest.len() {
            return stripped;
        }
    }
    name
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<NonEmptyText>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value).and_then(NonEmptyText::optional))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}
