//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ByCourseResponse, ClearResponse, CourseGrid, GenerateResponse, HealthResponse,
    TimetableEntryDto, TimetableListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::CatalogRepository;
use crate::db::services as db_services;
use crate::models::CourseId;
use crate::services::{projection, GenerateOutcome};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Regeneration Workflow
// =============================================================================

/// POST /v1/timetable/generate
///
/// Generate and persist a full grid. When entries already exist nothing is
/// changed and a `conflict` response tells the caller to confirm by clearing
/// first.
pub async fn generate_timetable(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    match state.controller.generate().await? {
        GenerateOutcome::Generated {
            entries,
            unfilled_slot_count,
        } => {
            let resolved = db_services::resolve_entries(state.repository.as_ref(), &entries).await?;
            let entries: Vec<TimetableEntryDto> = resolved.into_iter().map(Into::into).collect();
            Ok((
                StatusCode::CREATED,
                Json(GenerateResponse::Generated {
                    entries,
                    unfilled_slot_count,
                }),
            ))
        }
        GenerateOutcome::Conflict { existing_count } => Ok((
            StatusCode::OK,
            Json(GenerateResponse::Conflict { existing_count }),
        )),
    }
}

/// POST /v1/timetable/clear
///
/// Delete every persisted entry. Idempotent: always succeeds, even on an
/// already-empty store.
pub async fn clear_timetable(State(state): State<AppState>) -> HandlerResult<ClearResponse> {
    let removed = state.controller.clear().await?;
    Ok(Json(ClearResponse {
        status: "cleared".to_string(),
        removed,
    }))
}

// =============================================================================
// Read Side
// =============================================================================

/// GET /v1/timetable
///
/// List all committed entries with references resolved to names.
pub async fn list_timetable(State(state): State<AppState>) -> HandlerResult<TimetableListResponse> {
    let resolved = db_services::resolved_entries(state.repository.as_ref()).await?;
    let entries: Vec<TimetableEntryDto> = resolved.into_iter().map(Into::into).collect();
    let total = entries.len();

    Ok(Json(TimetableListResponse { entries, total }))
}

/// GET /v1/timetable/grid/{course_id}
///
/// Day-by-period grid for one course, with a "No Class" sentinel in empty
/// cells.
pub async fn get_course_grid(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> HandlerResult<CourseGrid> {
    let course_id = CourseId::new(course_id);
    let courses = state.repository.list_active_courses().await?;
    let course = courses
        .into_iter()
        .find(|c| c.id == course_id)
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;

    let resolved = db_services::resolved_entries(state.repository.as_ref()).await?;
    Ok(Json(projection::course_grid(&course, &resolved)))
}

/// GET /v1/timetable/by-course
///
/// All committed entries grouped into per-course buckets.
pub async fn list_by_course(State(state): State<AppState>) -> HandlerResult<ByCourseResponse> {
    let resolved = db_services::resolved_entries(state.repository.as_ref()).await?;
    let courses = projection::group_by_course(&resolved);
    let total = courses.len();

    Ok(Json(ByCourseResponse { courses, total }))
}
