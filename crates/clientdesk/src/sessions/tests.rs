use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::service::{FlowKind, SessionServiceError, WizardSessionService};
use super::session_router;
use crate::workflows::wizard::{FieldValue, WizardError};

fn service() -> WizardSessionService {
    WizardSessionService::standard()
}

fn filled_intake(service: &WizardSessionService) -> String {
    let view = service
        .create(FlowKind::Intake, "individual")
        .expect("known tag");
    let id = view.session_id;
    service
        .set_field(&id, "first_name", FieldValue::text("John"))
        .expect("session present");
    service
        .set_field(&id, "surname", FieldValue::text("Doe"))
        .expect("session present");
    service
        .set_field(&id, "email", FieldValue::text("john@example.com"))
        .expect("session present");
    service
        .set_field(&id, "phone", FieldValue::text("5550102030"))
        .expect("session present");
    service
        .set_field(&id, "id_type", FieldValue::text("national-id"))
        .expect("session present");
    service
        .set_field(&id, "id_number", FieldValue::text("123456789"))
        .expect("session present");
    service
        .set_field(&id, "date_of_birth", FieldValue::text("1988-04-12"))
        .expect("session present");
    id
}

#[test]
fn create_assigns_sequential_ids_per_registry() {
    let service = service();
    let first = service.create(FlowKind::Intake, "individual").expect("ok");
    let second = service.create(FlowKind::Booking, "immigration").expect("ok");
    assert_ne!(first.session_id, second.session_id);
    assert_eq!(second.kind, FlowKind::Booking);
    assert_eq!(second.step_count, 4);
}

#[test]
fn create_rejects_a_tag_from_the_wrong_flow() {
    let service = service();
    let error = service
        .create(FlowKind::Booking, "individual")
        .expect_err("department expected");
    assert!(matches!(error, SessionServiceError::UnknownTag { .. }));
}

#[test]
fn advance_surfaces_the_gate_failure_without_moving() {
    let service = service();
    let view = service.create(FlowKind::Intake, "company").expect("ok");
    let error = service.advance(&view.session_id).expect_err("unsatisfied");
    assert!(matches!(
        error,
        SessionServiceError::Wizard(WizardError::StepInvalid { step: 1 })
    ));
    let after = service.get(&view.session_id).expect("still registered");
    assert_eq!(after.current_step, 1);
}

#[test]
fn full_intake_walk_ends_with_submit_discarding_the_session() {
    let service = service();
    let id = filled_intake(&service);

    for _ in 1..5 {
        service.advance(&id).expect("steps satisfied");
    }
    service.toggle_service(&id, "Tax Filing").expect("present");

    let requirements = service.requirements(&id).expect("resolvable");
    assert!(requirements.iter().any(|entry| entry.name == "ID Copy"));
    assert!(requirements
        .iter()
        .any(|entry| entry.name == "Tax Clearance Form"));

    let snapshot = service.submit(&id).expect("at final step");
    assert_eq!(snapshot.tag, "individual");
    assert_eq!(snapshot.selected_services, vec!["Tax Filing".to_string()]);

    let error = service.get(&id).expect_err("session discarded");
    assert!(matches!(error, SessionServiceError::NotFound(_)));
}

#[test]
fn submit_off_the_final_step_is_refused_and_keeps_the_session() {
    let service = service();
    let id = filled_intake(&service);
    let error = service.submit(&id).expect_err("not at review");
    assert!(matches!(
        error,
        SessionServiceError::Wizard(WizardError::NotAtFinalStep { step: 1 })
    ));
    assert!(service.get(&id).is_ok());
}

#[test]
fn reference_data_lists_tags_steps_and_services_with_labels() {
    let service = service();

    let intake = service.reference(FlowKind::Intake);
    assert_eq!(intake.steps.len(), 5);
    assert_eq!(intake.steps[0].label, "Basic Information");
    assert!(intake
        .tags
        .iter()
        .any(|tag| tag.key == "sole_trader" && tag.label == "Sole Trader"));
    assert!(intake
        .services
        .iter()
        .any(|entry| entry.name == "Tax Filing"));
    assert_eq!(intake.formatters, vec!["phone", "national-id"]);

    let booking = service.reference(FlowKind::Booking);
    assert_eq!(booking.steps.len(), 4);
    assert!(booking
        .tags
        .iter()
        .any(|tag| tag.key == "immigration" && tag.label == "Immigration"));
}

#[test]
fn format_and_validate_are_exposed_through_the_registry() {
    let service = service();
    let result = service.format("phone", "5550102030").expect("known");
    assert_eq!(result.formatted, "555 010 2030");

    let error = service.format("postcode", "AB1").expect_err("unknown");
    assert!(matches!(error, SessionServiceError::UnknownFormatter(_)));

    assert!(service.validate_id("passport", "A1234567"));
    assert!(!service.validate_id("passport", "12345678"));
}

async fn request(
    router: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(value) => builder
            .body(Body::from(serde_json::to_vec(&value).expect("serializable")))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    };

    let response = router.oneshot(request).await.expect("handler responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn session_routes_cover_the_wizard_lifecycle() {
    let service = Arc::new(service());
    let router = session_router(service);

    let (status, created) = request(
        router.clone(),
        "POST",
        "/api/v1/sessions",
        Some(json!({ "kind": "intake", "tag": "individual" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = created["session_id"].as_str().expect("id present");

    let (status, body) = request(
        router.clone(),
        "POST",
        &format!("/api/v1/sessions/{session_id}/advance"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]
        .as_str()
        .expect("message present")
        .contains("step 1"));

    for (name, value) in [
        ("first_name", json!("John")),
        ("surname", json!("Doe")),
    ] {
        let (status, _) = request(
            router.clone(),
            "PUT",
            &format!("/api/v1/sessions/{session_id}/fields"),
            Some(json!({ "name": name, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, advanced) = request(
        router.clone(),
        "POST",
        &format!("/api/v1/sessions/{session_id}/advance"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advanced["current_step"], json!(2));

    let (status, retreated) = request(
        router.clone(),
        "POST",
        &format!("/api/v1/sessions/{session_id}/retreat"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(retreated["current_step"], json!(1));
}

#[tokio::test]
async fn requirements_route_returns_the_resolved_set() {
    let service = Arc::new(service());
    let session_id = filled_intake(&service);
    let router = session_router(service);

    let (status, _) = request(
        router.clone(),
        "POST",
        &format!("/api/v1/sessions/{session_id}/services"),
        Some(json!({ "name": "Immigration Case" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        router,
        "GET",
        &format!("/api/v1/sessions/{session_id}/requirements"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("list")
        .iter()
        .map(|entry| entry["name"].as_str().expect("name"))
        .collect();
    assert_eq!(
        names,
        vec!["ID Copy", "Proof of Address", "Passport Copy", "Visa History", "Police Clearance"]
    );
}

#[tokio::test]
async fn reference_route_serves_dropdown_data() {
    let router = session_router(Arc::new(service()));

    let (status, body) = request(router.clone(), "GET", "/api/v1/reference/intake", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], json!("intake"));
    assert_eq!(body["tags"][0]["label"], json!("Individual"));
    assert_eq!(body["steps"][4]["label"], json!("Review & Documents"));

    let (status, _) = request(router, "GET", "/api/v1/reference/walk-in", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_sessions_map_to_not_found() {
    let router = session_router(Arc::new(service()));
    let (status, body) = request(router, "GET", "/api/v1/sessions/ses-999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().expect("message").contains("ses-999999"));
}

#[tokio::test]
async fn format_route_reports_rejections_in_band() {
    let router = session_router(Arc::new(service()));
    let (status, body) = request(
        router,
        "POST",
        "/api/v1/format",
        Some(json!({ "formatter": "phone", "raw": "555x010" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["formatted"], json!("555 010"));
    assert!(body["error"].as_str().expect("rejection").contains("digits"));
}
