use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/events", post(record_event))
        .route("/exams/:exam_id", get(get_exam))
        .route("/exams/:exam_id/readiness", post(compute_readiness))
        .route("/due-today", get(get_due_today))
        .route("/review-queue", get(get_review_queue))
        .route("/weak", get(get_weak_concepts))
        .route("/summary", get(get_summary))
        .route("/schedule/refresh", post(refresh_schedule))
        .route("/reset", post(reset_profile))
}

async fn get_profile(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    Ok(ok(engine.profile().clone()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordEventRequest {
    concepts: Vec<String>,
    hint_level: i64,
}

async fn record_event(
    State(state): State<AppState>,
    Json(req): Json<RecordEventRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut engine = state.engine().await;
    let profile = engine
        .record_raw_event(req.concepts.as_slice(), req.hint_level)
        .await?
        .clone();
    Ok(ok(profile))
}

async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    match engine.profile().exams.get(&exam_id) {
        Some(exam) => Ok(ok(exam.clone())),
        None => Err(AppError::not_found(&format!(
            "No readiness computed for exam '{exam_id}'"
        ))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessRequest {
    concepts: Vec<String>,
}

async fn compute_readiness(
    State(state): State<AppState>,
    Path(exam_id): Path<String>,
    Json(req): Json<ReadinessRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut engine = state.engine().await;
    let exam = engine
        .compute_exam_readiness(&exam_id, req.concepts.as_slice())
        .await?;
    Ok(ok(exam))
}

async fn get_due_today(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    Ok(ok(engine.due_today().to_vec()))
}

async fn get_review_queue(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    Ok(ok(engine.review_queue()))
}

#[derive(Debug, Deserialize)]
struct WeakQuery {
    threshold: Option<f64>,
}

async fn get_weak_concepts(
    State(state): State<AppState>,
    Query(query): Query<WeakQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    let weak = match query.threshold {
        Some(threshold) if !threshold.is_finite() => {
            return Err(AppError::bad_request(
                "VALIDATION_ERROR",
                "threshold must be a finite number",
            ));
        }
        Some(threshold) => engine.weak_concepts_below(threshold),
        None => engine.weak_concepts(),
    };
    Ok(ok(weak))
}

async fn get_summary(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let engine = state.engine().await;
    Ok(ok(engine.summary()))
}

async fn refresh_schedule(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut engine = state.engine().await;
    let schedule = engine.refresh_schedule().await?.schedule.clone();
    Ok(ok(schedule))
}

async fn reset_profile(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut engine = state.engine().await;
    let profile = engine.reset_profile().await?.clone();
    tracing::warn!(profile_id = %profile.id, "Mastery profile reset via API");
    Ok(ok(profile))
}
