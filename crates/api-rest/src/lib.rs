//! # API REST
//!
//! REST API for the MIB doctors directory.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation (served as JSON at `/api-docs/openapi.json`)
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! The directory engines live in `mib-core`; this crate only maps requests onto
//! [`mib_core::DirectoryState`] and the Doctor Repository.

#![warn(rust_2018_idioms)]

mod handlers;
mod state;

#[cfg(test)]
mod tests;

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

pub use handlers::{
    FieldValueReq, FocusReq, HealthRes, InputRes, LetterReq, ListRes, SuggestionsRes,
};
pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_directory,
        handlers::suggestions,
        handlers::input,
        handlers::focus,
        handlers::select,
        handlers::letter,
        handlers::dismiss,
        handlers::get_doctor,
    ),
    components(schemas(
        HealthRes,
        ListRes,
        SuggestionsRes,
        FieldValueReq,
        FocusReq,
        LetterReq,
        InputRes,
        mib_core::DoctorCard,
        mib_core::DoctorDetail,
        mib_core::DoctorField,
        mib_core::FilterCriteria,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the REST router over a loaded [`AppState`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/directory", get(handlers::list_directory))
        .route("/directory/suggestions", get(handlers::suggestions))
        .route("/directory/input", post(handlers::input))
        .route("/directory/focus", post(handlers::focus))
        .route("/directory/select", post(handlers::select))
        .route("/directory/letter", post(handlers::letter))
        .route("/directory/dismiss", post(handlers::dismiss))
        .route("/doctors/:id", get(handlers::get_doctor))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
