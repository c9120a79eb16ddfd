//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::error::StocktakeError;
use crate::excel::{ExportReport, SpreadsheetBuffer};
use crate::layout::{OUTPUT_FILE_NAME, PREVIEW_ROWS, XLSX_MIME};
use crate::pipeline;
use crate::transform;
use crate::types::CellValue;

/// Header reporting how many records were left out of every sheet
pub const UNROUTED_ROWS_HEADER: &str = "x-stocktake-unrouted-rows";
/// Header carrying the number of sheets in the workbook
pub const SHEET_COUNT_HEADER: &str = "x-stocktake-sheet-count";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Stocktake API Server".to_string(),
        version: state.version.clone(),
        description: "Cost ledger to physical inventory count workbook converter".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/convert",
                "POST",
                "Upload a ledger (.xlsx/.xls body), download the count workbook",
            ),
            EndpointInfo::new(
                "/api/v1/preview",
                "POST",
                "Upload a ledger, get the first transformed rows as JSON",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub period_month: u32,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        period_month: state.options.period.month(),
        features: vec!["convert".to_string(), "preview".to_string()],
    }))
}

/// POST /api/v1/convert - Ledger in, count workbook out
pub async fn convert(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match pipeline::convert_bytes(body.to_vec(), &state.options) {
        Ok(buffer) => {
            info!(
                sheets = buffer.sheet_count(),
                unrouted = buffer.report.unrouted_rows,
                "conversion served"
            );
            download_response(buffer)
        }
        Err(e) => error_response(e),
    }
}

/// Preview query parameters
#[derive(Deserialize, Default)]
pub struct PreviewQuery {
    pub rows: Option<usize>,
}

/// Preview response
#[derive(Serialize, Default)]
pub struct PreviewResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub total_rows: usize,
    pub report: ExportReport,
    pub generated_at: String,
}

/// POST /api/v1/preview - First transformed rows as JSON
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
    body: Bytes,
) -> Response {
    let table = match pipeline::load_bytes(body.to_vec(), &state.options) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    let report = ExportReport::from_grouped(&transform::group_by_category(&table));

    let rows = transform::preview(&table, query.rows.unwrap_or(PREVIEW_ROWS))
        .iter()
        .map(|r| r.values.clone())
        .collect();

    Json(ApiResponse::ok(PreviewResponse {
        columns: table.columns.iter().map(|c| c.name.clone()).collect(),
        rows,
        total_rows: table.row_count(),
        report,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

/// Workbook download with the fixed file name and MIME type
fn download_response(buffer: SpreadsheetBuffer) -> Response {
    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(OUTPUT_FILE_NAME),
        ),
        (
            HeaderName::from_static(UNROUTED_ROWS_HEADER),
            buffer.report.unrouted_rows.to_string(),
        ),
        (
            HeaderName::from_static(SHEET_COUNT_HEADER),
            buffer.sheet_count().to_string(),
        ),
    ];
    (StatusCode::OK, headers, buffer.bytes).into_response()
}

/// Map a conversion failure onto a JSON error response
fn error_response(err: StocktakeError) -> Response {
    let status = match &err {
        StocktakeError::InputParse(_) => StatusCode::BAD_REQUEST,
        StocktakeError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StocktakeError::Io(_) | StocktakeError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(status = status.as_u16(), error = %err, "conversion failed");
    (status, Json(ApiResponse::<()>::err(err.to_string()))).into_response()
}

/// `attachment` disposition with an ASCII fallback and the UTF-8 name (RFC 5987)
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());
        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err() {
        let response: ApiResponse<String> = ApiResponse::err("Something went wrong");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_api_response_unique_ids() {
        let r1: ApiResponse<i32> = ApiResponse::ok(1);
        let r2: ApiResponse<i32> = ApiResponse::ok(2);
        assert_ne!(r1.request_id, r2.request_id);
    }

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("count.xlsx"),
            "attachment; filename=\"count.xlsx\"; filename*=UTF-8''count.xlsx"
        );
    }

    #[test]
    fn test_content_disposition_hangul() {
        let value = content_disposition("재고.xlsx");
        assert!(value.starts_with("attachment; filename=\"__.xlsx\""));
        assert!(value.ends_with("filename*=UTF-8''%EC%9E%AC%EA%B3%A0.xlsx"));
    }

    #[test]
    fn test_content_disposition_escapes_separators() {
        let value = content_disposition("a b;c.xlsx");
        assert!(value.starts_with("attachment; filename=\"a_b;c.xlsx\""));
        assert!(value.ends_with("filename*=UTF-8''a%20b%3Bc.xlsx"));
    }

    #[test]
    fn test_content_disposition_is_a_valid_header_value() {
        let value = content_disposition(OUTPUT_FILE_NAME);
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_error_status_mapping() {
        let response = error_response(StocktakeError::InputParse("bad".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(StocktakeError::Validation("bad".to_string()));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = error_response(StocktakeError::Export("bad".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
