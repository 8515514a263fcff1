//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use helios::dashboard::validate;
use helios::{HeliosError, ReportEntry, ReportView};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub reports_dir: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Returned with 422 so the offending document can be inspected
#[derive(Debug, Serialize)]
pub struct InvalidReportResponse {
    pub error: &'static str,
    pub detail: String,
    pub document: Value,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl std::fmt::Display) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        reports_dir: state.catalog.dir().display().to_string(),
    })
}

/// Reports newest first, summary files excluded
pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportEntry>>, ApiError> {
    state.catalog.list().await.map(Json).map_err(|e| {
        tracing::error!("Listing reports failed: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "LIST_FAILED", e)
    })
}

/// One report, validated and shaped for display
pub async fn get_report(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let document = state.catalog.load(&file).await.map_err(|e| {
        tracing::warn!(%file, "Failed to load report: {}", e);
        match e {
            HeliosError::InvalidReportName(_) => {
                api_error(StatusCode::BAD_REQUEST, "INVALID_NAME", e)
            }
            _ => api_error(StatusCode::NOT_FOUND, "LOAD_FAILED", e),
        }
    })?;

    let validation = validate(&document);
    if !validation.is_valid() {
        let detail = validation.message().unwrap_or_default();
        tracing::warn!(%file, %detail, "Invalid report");
        let body = InvalidReportResponse {
            error: "Invalid Helios report format",
            detail,
            document,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    Ok(Json(ReportView::from_report(&document)).into_response())
}
