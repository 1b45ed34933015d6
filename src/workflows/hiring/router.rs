use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{OpeningId, SubmissionId};
use super::intake::{DecisionPayload, OpeningIntake};
use super::repository::{AlertPublisher, AssessmentRepository, RepositoryError};
use super::service::{AssessmentServiceError, HiringAssessmentService};

/// Router builder exposing the hiring assessment endpoints.
pub fn hiring_router<R, A>(service: Arc<HiringAssessmentService<R, A>>) -> Router
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/hiring/openings", post(open_handler::<R, A>))
        .route(
            "/api/v1/hiring/openings/:opening_id/submissions",
            post(submit_handler::<R, A>),
        )
        .route(
            "/api/v1/hiring/openings/:opening_id/results",
            get(results_handler::<R, A>),
        )
        .route(
            "/api/v1/hiring/submissions/:submission_id",
            get(submission_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) async fn open_handler<R, A>(
    State(service): State<Arc<HiringAssessmentService<R, A>>>,
    axum::Json(intake): axum::Json<OpeningIntake>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.open(intake) {
        Ok(record) => {
            let payload = json!({
                "opening_id": record.opening.id,
                "title": record.opening.title,
                "status": record.status.label(),
                "panel_size": record.panel.len(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<HiringAssessmentService<R, A>>>,
    Path(opening_id): Path<String>,
    axum::Json(payload): axum::Json<DecisionPayload>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.submit(&OpeningId(opening_id), payload) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_handler<R, A>(
    State(service): State<Arc<HiringAssessmentService<R, A>>>,
    Path(opening_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.results(&OpeningId(opening_id)) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submission_handler<R, A>(
    State(service): State<Arc<HiringAssessmentService<R, A>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.get_submission(&SubmissionId(submission_id)) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    match error {
        AssessmentServiceError::Intake(violation) => {
            let payload = json!({ "error": violation.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AssessmentServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "assessment already submitted" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
