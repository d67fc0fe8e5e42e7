//! Shift roster routes.
//!
//! - `GET    /shifts?start=&end=` — public read, ordered by date
//! - `POST   /shifts` — admin, create one record
//! - `POST   /shifts/auto-generate?start_date=&end_date=` — admin, range fill
//! - `PATCH  /shifts/{date}/{work_type}` — admin, set manual override

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use rota_roster::types::{parse_date, parse_shift_type};
use rota_roster::{RosterError, ShiftRecord, ShiftType};

use crate::app::AppState;
use crate::auth::require_admin;
use crate::http::ErrorBody;

#[derive(Deserialize)]
pub struct CreateShiftRequest {
    pub date: String,
    pub work_type: String,
    #[serde(default)]
    pub changed_work_type: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub generated: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Read model for GET /shifts: the override is exposed as-is, `null` when
/// the generated assignment stands.
#[derive(Serialize)]
pub struct ShiftView {
    pub date: NaiveDate,
    pub work_type: ShiftType,
    pub changed_work_type: Option<ShiftType>,
}

impl From<ShiftRecord> for ShiftView {
    fn from(record: ShiftRecord) -> Self {
        Self {
            date: record.date,
            work_type: record.work_type,
            changed_work_type: record.changed_work_type,
        }
    }
}

/// POST /shifts — insert a single record.
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Json(req): Json<CreateShiftRequest>,
) -> Result<(StatusCode, Json<ShiftRecord>), (StatusCode, Json<ErrorBody>)> {
    require_admin(&state, &headers)?;

    let date = parse_date(&req.date).map_err(roster_error)?;
    let work_type = parse_shift_type(&req.work_type).map_err(roster_error)?;
    let changed_work_type = match &req.changed_work_type {
        Some(s) => Some(parse_shift_type(s).map_err(roster_error)?),
        None => None,
    };

    let record = state
        .store
        .create(date, work_type, changed_work_type)
        .map_err(roster_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /shifts/auto-generate — fill [start_date, end_date] from the cycle.
///
/// The walk is sequential and can take a while for multi-year ranges, so it
/// runs on the blocking pool rather than holding an async worker.
pub async fn auto_generate_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorBody>)> {
    require_admin(&state, &headers)?;

    let start = parse_date(&query.start_date).map_err(roster_error)?;
    let end = parse_date(&query.end_date).map_err(roster_error)?;

    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || engine.generate(start, end))
        .await
        .map_err(|e| {
            error!(error = %e, "range fill task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "generation failed".to_string(),
                }),
            )
        })?
        .map_err(roster_error)?;

    Ok(Json(GenerateResponse {
        message: format!("{} generated", report.generated),
        generated: report.generated,
        start_date: report.start_date,
        end_date: report.end_date,
    }))
}

/// GET /shifts — list records, optionally restricted to [start, end].
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ShiftView>>, (StatusCode, Json<ErrorBody>)> {
    // the filter applies only when both bounds are present; a lone bound is
    // ignored
    let range = match (&query.start, &query.end) {
        (Some(start), Some(end)) => Some((
            parse_date(start).map_err(roster_error)?,
            parse_date(end).map_err(roster_error)?,
        )),
        _ => None,
    };

    let records = state.store.list(range).map_err(roster_error)?;
    Ok(Json(records.into_iter().map(ShiftView::from).collect()))
}

/// PATCH /shifts/{date}/{work_type} — set the manual override for a date.
pub async fn override_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Path((date, work_type)): Path<(String, String)>,
) -> Result<Json<ShiftRecord>, (StatusCode, Json<ErrorBody>)> {
    require_admin(&state, &headers)?;

    let date = parse_date(&date).map_err(roster_error)?;
    let new_type = parse_shift_type(&work_type).map_err(roster_error)?;

    let record = state
        .store
        .set_override(date, new_type)
        .map_err(roster_error)?;
    Ok(Json(record))
}

/// Map a roster failure to its HTTP shape.
fn roster_error(e: RosterError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &e {
        RosterError::NotFound { .. } => StatusCode::NOT_FOUND,
        RosterError::Conflict { .. } => StatusCode::CONFLICT,
        RosterError::InvalidDate(_) | RosterError::InvalidShiftType(_) => StatusCode::BAD_REQUEST,
        RosterError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %e, "roster operation failed");
    }
    (
        status,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
}
