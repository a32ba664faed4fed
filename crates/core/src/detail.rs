//! View models for the list cards and the detail page.

use crate::config::CoreConfig;
use crate::constants::NO_MORE_INFO;
use crate::doctor::Doctor;
use crate::routes::DetailRoute;
use mib_types::NonEmptyText;
use serde::Serialize;

/// One entry in the doctor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct DoctorCard {
    pub id: String,
    /// Upper-cased name.
    pub display_name: String,
    pub speciality: Option<String>,
    pub clinic_name: Option<String>,
    /// The doctor's `image_url` as sent, or the placeholder.
    pub image_url: String,
    /// Detail route, remembering the list page.
    pub link: String,
}

impl DoctorCard {
    pub fn new(doctor: &Doctor, cfg: &CoreConfig, page: usize) -> Self {
        let link = DetailRoute {
            id: doctor.id.to_string(),
            page: Some(page),
        };

        Self {
            id: doctor.id.to_string(),
            display_name: doctor.name.to_uppercase(),
            speciality: text(&doctor.speciality),
            clinic_name: text(&doctor.clinic_name),
            image_url: doctor
                .image_url
                .as_ref()
                .map_or_else(|| cfg.placeholder_image().to_string(), |u| u.to_string()),
            link: link.path(),
        }
    }
}

/// Everything the detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct DoctorDetail {
    pub id: String,
    pub name: String,
    pub speciality: Option<String>,
    pub clinic_name: Option<String>,
    /// `image_url` under the configured image base, or the placeholder.
    pub image_url: String,
    /// Non-empty address lines, in order.
    pub address_lines: Vec<String>,
    pub email: Option<String>,
    pub more_info: String,
    /// List route to return to.
    pub back_link: String,
}

impl DoctorDetail {
    pub fn new(doctor: &Doctor, cfg: &CoreConfig, page: Option<usize>) -> Self {
        Self {
            id: doctor.id.to_string(),
            name: doctor.name.clone(),
            speciality: text(&doctor.speciality),
            clinic_name: text(&doctor.clinic_name),
            image_url: resolve_image(doctor, cfg),
            address_lines: doctor.address_lines().map(str::to_owned).collect(),
            email: text(&doctor.email),
            more_info: doctor
                .more_info
                .as_ref()
                .map_or_else(|| NO_MORE_INFO.to_string(), |m| m.to_string()),
            back_link: DetailRoute {
                id: doctor.id.to_string(),
                page,
            }
            .back()
            .path(),
        }
    }
}

fn resolve_image(doctor: &Doctor, cfg: &CoreConfig) -> String {
    match &doctor.image_url {
        Some(url) => {
            let base = cfg.image_base().trim_end_matches('/');
            let file = url.as_str().trim_start_matches('/');
            format!("{base}/{file}")
        }
        None => cfg.placeholder_image().to_string(),
    }
}

fn text(value: &Option<NonEmptyText>) -> Option<String> {
    value.as_ref().map(|v| v.as_str().to_owned())
}
