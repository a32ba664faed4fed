use crate::state::AppState;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
};
use mib_core::{
    parse_letter_choice, CoreConfig, DirectoryError, DirectoryQuery, DirectoryState, DoctorCard,
    DoctorDetail, DoctorField, FilterCriteria, PageSize,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

type ApiError = (StatusCode, &'static str);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Query string of `GET /directory`. Absent parameters leave the session untouched.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    pub name: Option<String>,
    pub speciality: Option<String>,
    pub clinic_name: Option<String>,
    /// A single letter, or `all` (or empty) to clear the letter.
    pub letter: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Show every match on one page.
    pub all: Option<bool>,
}

/// One page of the directory listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListRes {
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub criteria: FilterCriteria,
    pub letter: Option<String>,
    pub doctors: Vec<DoctorCard>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionsParams {
    pub field: DoctorField,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsRes {
    pub field: DoctorField,
    pub suggestions: Vec<String>,
}

/// A value typed into, or picked for, one filter input.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldValueReq {
    pub field: DoctorField,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FocusReq {
    pub field: DoctorField,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LetterReq {
    /// `None`, empty or `all` selects every letter.
    pub letter: Option<String>,
}

/// Result of typing into or focusing an input: that field's suggestions plus the refreshed list.
#[derive(Debug, Serialize, ToSchema)]
pub struct InputRes {
    pub field: DoctorField,
    pub suggestions: Vec<String>,
    pub list: ListRes,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailParams {
    /// List page to return to from the detail view.
    pub page: Option<usize>,
}

/// Maps a core error onto a status code, logging it on the way out.
fn error_response(context: &str, e: DirectoryError) -> ApiError {
    match e {
        DirectoryError::InvalidInput(_)
        | DirectoryError::InvalidPage(_)
        | DirectoryError::Text(_)
        | DirectoryError::Letter(_) => {
            tracing::warn!("{}: {}", context, e);
            (StatusCode::BAD_REQUEST, "Bad request")
        }
        DirectoryError::NotFound(_) => {
            tracing::info!("{}: {}", context, e);
            (StatusCode::NOT_FOUND, "Doctor not found")
        }
        DirectoryError::Http(_)
        | DirectoryError::UpstreamStatus { .. }
        | DirectoryError::FileRead(_)
        | DirectoryError::Deserialization(_) => {
            tracing::error!("{}: {:?}", context, e);
            (StatusCode::BAD_GATEWAY, "Doctor repository unavailable")
        }
    }
}

impl ListParams {
    fn into_query(self) -> Result<DirectoryQuery, DirectoryError> {
        let page_size = match (self.all, self.page_size) {
            (Some(true), _) => Some(PageSize::All),
            (_, Some(size)) => Some(PageSize::fixed(size)?),
            _ => None,
        };
        let letter = self
            .letter
            .as_deref()
            .map(parse_letter_choice)
            .transpose()?;

        Ok(DirectoryQuery {
            name: self.name,
            speciality: self.speciality,
            clinic_name: self.clinic_name,
            letter,
            page: self.page,
            page_size,
        })
    }
}

fn list_res(directory: &DirectoryState, cfg: &CoreConfig) -> ListRes {
    let view = directory.view();
    ListRes {
        page: view.page,
        total_pages: view.total_pages,
        total_matches: view.total_matches,
        criteria: directory.criteria().clone(),
        letter: directory.letter().map(|l| l.to_string()),
        doctors: view
            .doctors
            .iter()
            .map(|d| DoctorCard::new(d, cfg, view.page))
            .collect(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports how many doctors the directory session holds.
#[axum::debug_handler]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    let loaded = state.directory.read().await.doctors().len();
    Json(HealthRes {
        ok: true,
        message: format!("MIB REST API is alive ({loaded} doctors loaded)"),
    })
}

#[utoipa::path(
    get,
    path = "/directory",
    params(ListParams),
    responses(
        (status = 200, description = "Current page of the directory", body = ListRes),
        (status = 400, description = "Bad request")
    )
)]
/// Applies list inputs to the session and returns the current page
///
/// Criteria and letter are applied first; a change to either resets the page to 1 before
/// `page` is honoured.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - `page` or `page_size` is 0,
/// - `letter` is not a single alphabetic character.
#[axum::debug_handler]
pub(crate) async fn list_directory(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListRes>, ApiError> {
    let query = params
        .into_query()
        .map_err(|e| error_response("Invalid directory query", e))?;

    let mut directory = state.directory.write().await;
    directory
        .apply_query(query)
        .map_err(|e| error_response("Invalid directory query", e))?;

    Ok(Json(list_res(&directory, state.cfg())))
}

#[utoipa::path(
    get,
    path = "/directory/suggestions",
    params(SuggestionsParams),
    responses(
        (status = 200, description = "Autocomplete values for one field", body = SuggestionsRes)
    )
)]
/// Suggestions for a partial value, drawn from the whole collection
///
/// Read-only: the session criteria and suggestion lists are not changed.
#[axum::debug_handler]
pub(crate) async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionsParams>,
) -> Json<SuggestionsRes> {
    let directory = state.directory.read().await;
    Json(SuggestionsRes {
        field: params.field,
        suggestions: mib_core::suggest(directory.doctors(), params.field, &params.q),
    })
}

#[utoipa::path(
    post,
    path = "/directory/input",
    request_body = FieldValueReq,
    responses(
        (status = 200, description = "Criterion updated", body = InputRes)
    )
)]
/// Typing into a filter input
#[axum::debug_handler]
pub(crate) async fn input(
    State(state): State<AppState>,
    Json(req): Json<FieldValueReq>,
) -> Json<InputRes> {
    let mut directory = state.directory.write().await;
    directory.set_criterion(req.field, req.value);
    Json(InputRes {
        field: req.field,
        suggestions: directory.suggestions(req.field).to_vec(),
        list: list_res(&directory, state.cfg()),
    })
}

#[utoipa::path(
    post,
    path = "/directory/focus",
    request_body = FocusReq,
    responses(
        (status = 200, description = "Suggestions for the focused input", body = InputRes)
    )
)]
/// Focus on a filter input. An empty speciality or clinic input lists every value.
#[axum::debug_handler]
pub(crate) async fn focus(
    State(state): State<AppState>,
    Json(req): Json<FocusReq>,
) -> Json<InputRes> {
    let mut directory = state.directory.write().await;
    directory.focus(req.field);
    Json(InputRes {
        field: req.field,
        suggestions: directory.suggestions(req.field).to_vec(),
        list: list_res(&directory, state.cfg()),
    })
}

#[utoipa::path(
    post,
    path = "/directory/select",
    request_body = FieldValueReq,
    responses(
        (status = 200, description = "Suggestion selected", body = ListRes)
    )
)]
/// Picks a suggestion; every suggestion list closes
#[axum::debug_handler]
pub(crate) async fn select(
    State(state): State<AppState>,
    Json(req): Json<FieldValueReq>,
) -> Json<ListRes> {
    let mut directory = state.directory.write().await;
    directory.select_suggestion(req.field, req.value);
    Json(list_res(&directory, state.cfg()))
}

#[utoipa::path(
    post,
    path = "/directory/letter",
    request_body = LetterReq,
    responses(
        (status = 200, description = "Letter selected", body = ListRes),
        (status = 400, description = "Bad request")
    )
)]
/// Picks a letter from the alphabet bar
#[axum::debug_handler]
pub(crate) async fn letter(
    State(state): State<AppState>,
    Json(req): Json<LetterReq>,
) -> Result<Json<ListRes>, ApiError> {
    let letter = parse_letter_choice(req.letter.as_deref().unwrap_or_default())
        .map_err(|e| error_response("Invalid letter", e))?;

    let mut directory = state.directory.write().await;
    directory.set_letter(letter);
    Ok(Json(list_res(&directory, state.cfg())))
}

#[utoipa::path(
    post,
    path = "/directory/dismiss",
    responses(
        (status = 204, description = "Suggestion lists closed")
    )
)]
#[axum::debug_handler]
pub(crate) async fn dismiss(State(state): State<AppState>) -> StatusCode {
    state.directory.write().await.dismiss_suggestions();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(
        ("id" = String, Path, description = "Doctor id"),
        DetailParams
    ),
    responses(
        (status = 200, description = "Doctor detail", body = DoctorDetail),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Doctor not found"),
        (status = 502, description = "Doctor repository unavailable")
    )
)]
/// Fetches one doctor from the repository
///
/// Always a fresh fetch; the session collection is not consulted.
///
/// # Errors
/// Returns:
/// - `400 Bad Request` if `page` is 0,
/// - `404 Not Found` if the repository has no such doctor,
/// - `502 Bad Gateway` if the repository request fails.
#[axum::debug_handler]
pub(crate) async fn get_doctor(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Query(params): Query<DetailParams>,
) -> Result<Json<DoctorDetail>, ApiError> {
    if params.page == Some(0) {
        return Err(error_response(
            "Invalid detail page",
            DirectoryError::InvalidPage("pages start at 1".into()),
        ));
    }

    let doctor = state
        .repository
        .get_doctor(&id)
        .await
        .map_err(|e| error_response("Get doctor error", e))?;

    Ok(Json(DoctorDetail::new(&doctor, state.cfg(), params.page)))
}
