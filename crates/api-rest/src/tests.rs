use super::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mib_core::{CoreConfig, DirectoryError, DirectoryResult, Doctor, DoctorId, DoctorRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// In-memory repository. `fail` makes every call look like an unreachable upstream.
struct StubRepository {
    doctors: Vec<Doctor>,
    fail: bool,
}

#[async_trait::async_trait]
impl DoctorRepository for StubRepository {
    async fn list_doctors(&self) -> DirectoryResult<Vec<Doctor>> {
        if self.fail {
            return Err(DirectoryError::FileRead(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "stub repository is down",
            )));
        }
        Ok(self.doctors.clone())
    }

    async fn get_doctor(&self, id: &str) -> DirectoryResult<Doctor> {
        let doctors = self.list_doctors().await?;
        doctors
            .into_iter()
            .find(|d| d.id.matches(id))
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }
}

fn doctors() -> Vec<Doctor> {
    vec![
        Doctor::new(DoctorId::Number(1), "Dr Jane Smith")
            .with_speciality("Cardiology")
            .with_clinic("Harbour Clinic"),
        Doctor::new(DoctorId::Number(2), "Dr Adam Brown")
            .with_speciality("Neurology")
            .with_clinic("Hill Clinic"),
        Doctor::new(DoctorId::Number(3), "Alice Wong")
            .with_speciality("Cardiology")
            .with_clinic("Hill Clinic"),
        Doctor::new(DoctorId::Number(4), "Dr Carl Jones").with_speciality("Dermatology"),
        Doctor::new(DoctorId::Text("x-5".into()), "Dr Cara Smythe")
            .with_speciality("cardiology"),
    ]
}

async fn app_with(page_size: usize, fail: bool) -> Router {
    let cfg = Arc::new(CoreConfig::new("http://localhost:5000", page_size).unwrap());
    let repository = Arc::new(StubRepository {
        doctors: doctors(),
        fail,
    });
    router(AppState::load(cfg, repository).await)
}

async fn app() -> Router {
    app_with(2, false).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn names(list: &Value) -> Vec<String> {
    list["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["display_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_loaded_collection() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("5 doctors"));
}

#[tokio::test]
async fn failed_initial_fetch_starts_empty() {
    let app = app_with(2, true).await;
    let (status, body) = get(&app, "/directory").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], json!(0));
    assert_eq!(body["total_pages"], json!(0));
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn lists_first_page_of_everything() {
    let app = app().await;
    let (status, body) = get(&app, "/directory").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["total_pages"], json!(3));
    assert_eq!(body["total_matches"], json!(5));
    assert_eq!(names(&body), vec!["DR JANE SMITH", "DR ADAM BROWN"]);
    assert_eq!(body["doctors"][0]["link"], json!("/doctor/1?page=1"));
    assert_eq!(body["doctors"][0]["image_url"], json!("/images/default.jpg"));
}

#[tokio::test]
async fn filter_change_resets_page_before_page_is_applied() {
    let app = app().await;
    get(&app, "/directory?page=3").await;

    let (_, body) = get(&app, "/directory?speciality=cardio").await;
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["total_matches"], json!(3));
    assert_eq!(body["criteria"]["speciality"], json!("cardio"));

    let (_, body) = get(&app, "/directory?page=2").await;
    assert_eq!(body["page"], json!(2));
    assert_eq!(names(&body), vec!["DR CARA SMYTHE"]);
}

#[tokio::test]
async fn letter_and_show_all() {
    let app = app().await;

    let (_, body) = get(&app, "/directory?letter=c&all=true").await;
    assert_eq!(body["letter"], json!("C"));
    assert_eq!(body["total_pages"], json!(1));
    assert_eq!(names(&body), vec!["DR CARL JONES", "DR CARA SMYTHE"]);

    let (_, body) = get(&app, "/directory?letter=all").await;
    assert_eq!(body["letter"], Value::Null);
    assert_eq!(body["total_matches"], json!(5));
}

#[tokio::test]
async fn rejects_bad_list_inputs() {
    let app = app().await;

    for uri in [
        "/directory?page=0",
        "/directory?page_size=0",
        "/directory?letter=ab",
        "/directory?letter=7",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn rejected_query_does_not_change_session() {
    let app = app().await;
    let (status, _) = get(&app, "/directory?speciality=neuro&page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/directory").await;
    assert_eq!(body["criteria"]["speciality"], json!(""));
    assert_eq!(body["total_matches"], json!(5));
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let app = app().await;
    let (status, body) = get(&app, "/directory?page=9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], json!(9));
    assert_eq!(body["total_pages"], json!(3));
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn suggestions_are_read_only() {
    let app = app().await;
    let (status, body) = get(&app, "/directory/suggestions?field=speciality&q=c").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["field"], json!("speciality"));
    assert_eq!(body["suggestions"], json!(["CARDIOLOGY"]));

    let (_, list) = get(&app, "/directory").await;
    assert_eq!(list["criteria"]["speciality"], json!(""));
}

#[tokio::test]
async fn empty_name_has_no_suggestions() {
    let app = app().await;
    let (_, body) = get(&app, "/directory/suggestions?field=name").await;
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn typing_updates_suggestions_and_list() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/directory/input",
        json!({"field": "clinic_name", "value": "hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!(["HILL CLINIC"]));
    assert_eq!(body["list"]["total_matches"], json!(2));
    assert_eq!(names(&body["list"]), vec!["DR ADAM BROWN", "ALICE WONG"]);
}

#[tokio::test]
async fn focus_on_empty_speciality_lists_all_values() {
    let app = app().await;
    let (_, body) = post(&app, "/directory/focus", json!({"field": "speciality"})).await;

    assert_eq!(
        body["suggestions"],
        json!(["CARDIOLOGY", "NEUROLOGY", "DERMATOLOGY"])
    );
}

#[tokio::test]
async fn select_and_letter_update_the_list() {
    let app = app().await;

    let (status, body) = post(
        &app,
        "/directory/select",
        json!({"field": "speciality", "value": "NEUROLOGY"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["DR ADAM BROWN"]);

    let (status, body) = post(&app, "/directory/letter", json!({"letter": "j"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], json!(0));

    let (status, _) = post(&app, "/directory/letter", json!({"letter": "jj"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dismiss_returns_no_content() {
    let app = app().await;
    let (status, body) = post(&app, "/directory/dismiss", json!({})).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn doctor_detail() {
    let app = app().await;
    let (status, body) = get(&app, "/doctors/x-5?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Dr Cara Smythe"));
    assert_eq!(body["back_link"], json!("/?page=2"));
    assert_eq!(body["more_info"], json!("No additional information available."));
}

#[tokio::test]
async fn doctor_detail_errors() {
    let app = app().await;
    let (status, _) = get(&app, "/doctors/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/doctors/1?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let failing = app_with(2, true).await;
    let (status, _) = get(&failing, "/doctors/1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn serves_openapi_document() {
    let app = app().await;
    let (status, body) = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/directory"].is_object());
    assert!(body["paths"]["/doctors/{id}"].is_object());
}
