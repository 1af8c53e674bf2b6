use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{FlowKind, SessionServiceError, WizardSessionService};
use crate::workflows::wizard::{FieldValue, WizardError};

/// Router builder exposing the wizard-session HTTP surface.
pub fn session_router(service: Arc<WizardSessionService>) -> Router {
    Router::new()
        .route("/api/v1/sessions", post(create_handler))
        .route("/api/v1/sessions/:session_id", get(get_handler))
        .route("/api/v1/sessions/:session_id/fields", put(set_field_handler))
        .route("/api/v1/sessions/:session_id/tag", put(set_tag_handler))
        .route("/api/v1/sessions/:session_id/advance", post(advance_handler))
        .route("/api/v1/sessions/:session_id/retreat", post(retreat_handler))
        .route("/api/v1/sessions/:session_id/reset", post(reset_handler))
        .route(
            "/api/v1/sessions/:session_id/services",
            post(toggle_service_handler),
        )
        .route(
            "/api/v1/sessions/:session_id/attachments",
            put(attach_handler),
        )
        .route(
            "/api/v1/sessions/:session_id/attachments/:key",
            delete(detach_handler),
        )
        .route(
            "/api/v1/sessions/:session_id/requirements",
            get(requirements_handler),
        )
        .route("/api/v1/sessions/:session_id/submit", post(submit_handler))
        .route("/api/v1/reference/:kind", get(reference_handler))
        .route("/api/v1/format", post(format_handler))
        .route("/api/v1/validate-id", post(validate_id_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateSessionRequest {
    pub(crate) kind: FlowKind,
    pub(crate) tag: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetFieldRequest {
    pub(crate) name: String,
    pub(crate) value: FieldValue,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetTagRequest {
    pub(crate) tag: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleServiceRequest {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachRequest {
    pub(crate) key: String,
    pub(crate) file_ref: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormatRequest {
    pub(crate) formatter: String,
    pub(crate) raw: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateIdRequest {
    pub(crate) id_type: String,
    pub(crate) value: String,
}

fn error_response(error: SessionServiceError) -> Response {
    let status = match &error {
        SessionServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        // A failed gate is expected traffic, not a server fault.
        SessionServiceError::Wizard(WizardError::StepInvalid { .. })
        | SessionServiceError::Wizard(WizardError::NotAtFinalStep { .. }) => StatusCode::CONFLICT,
        SessionServiceError::UnknownTag { .. } | SessionServiceError::UnknownFormatter(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn create_handler(
    State(service): State<Arc<WizardSessionService>>,
    Json(request): Json<CreateSessionRequest>,
) -> Response {
    match service.create(request.kind, &request.tag) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.get(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_field_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
    Json(request): Json<SetFieldRequest>,
) -> Response {
    match service.set_field(&session_id, &request.name, request.value) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_tag_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
    Json(request): Json<SetTagRequest>,
) -> Response {
    match service.set_tag(&session_id, &request.tag) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.advance(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn retreat_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.retreat(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.reset(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn toggle_service_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
    Json(request): Json<ToggleServiceRequest>,
) -> Response {
    match service.toggle_service(&session_id, &request.name) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn attach_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
    Json(request): Json<AttachRequest>,
) -> Response {
    match service.attach(&session_id, &request.key, &request.file_ref) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detach_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path((session_id, key)): Path<(String, String)>,
) -> Response {
    match service.detach(&session_id, &key) {
        Ok((removed, view)) => {
            let payload = json!({ "removed": removed, "session": view });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn requirements_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.requirements(&session_id) {
        Ok(requirements) => (StatusCode::OK, Json(requirements)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.submit(&session_id) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reference_handler(
    State(service): State<Arc<WizardSessionService>>,
    Path(kind): Path<String>,
) -> Response {
    match FlowKind::parse(&kind) {
        Some(kind) => (StatusCode::OK, Json(service.reference(kind))).into_response(),
        None => {
            let payload = json!({ "error": format!("unknown flow kind '{kind}'") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn format_handler(
    State(service): State<Arc<WizardSessionService>>,
    Json(request): Json<FormatRequest>,
) -> Response {
    match service.format(&request.formatter, &request.raw) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn validate_id_handler(
    State(service): State<Arc<WizardSessionService>>,
    Json(request): Json<ValidateIdRequest>,
) -> Response {
    let valid = service.validate_id(&request.id_type, &request.value);
    (StatusCode::OK, Json(json!({ "valid": valid }))).into_response()
}
