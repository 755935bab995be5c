//! HTTP request handlers for the Payroll Structuring Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{IngestError, IngestResult};
use crate::ingest::decode_upload;
use crate::models::{RowTable, StructuredPayroll};
use crate::parsing::structure_payroll_with;

use super::request::StructureRequest;
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, ParseResponse, StructureResponse,
};
use super::state::AppState;

/// Room for multipart framing on top of the upload limit, so that an
/// oversized file is reported as `FILE_TOO_LARGE` by the decoder.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Name of the multipart field carrying the statement.
const FILE_FIELD: &str = "file";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .config()
        .server()
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/parse-excel", post(parse_excel_handler))
        .route("/structure", post(structure_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /parse-excel.
///
/// Reads the `file` field of a multipart upload, decodes it into a row table
/// and structures it.
async fn parse_excel_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing upload request");

    let mut multipart = multipart.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Multipart rejected");
        ApiErrorResponse::bad_request(
            ApiError::new("NO_FILE", "Request must be multipart/form-data with a 'file' field")
                .with_details(rejection.body_text()),
        )
    })?;

    let (filename, bytes) = match read_file_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(error) => {
            warn!(correlation_id = %correlation_id, code = error.error.code.as_str(), "Upload could not be read");
            return Err(error);
        }
    };

    let filename = sanitize_filename(&filename);
    info!(
        correlation_id = %correlation_id,
        filename = %filename,
        size = bytes.len(),
        "Upload received"
    );

    let start_time = Instant::now();
    let config = state.shared_config();
    let task_filename = filename.clone();
    let outcome = tokio::task::spawn_blocking(move || process_upload(&task_filename, &bytes, &config)).await;

    match outcome {
        Ok(Ok((data, structured))) => {
            info!(
                correlation_id = %correlation_id,
                rows = data.len(),
                employees = structured.summary.total_employees,
                events = structured.summary.total_events,
                duration_us = start_time.elapsed().as_micros(),
                "Upload structured successfully"
            );
            Ok(Json(ParseResponse {
                success: true,
                data,
                structured,
                filename,
                processed_at: Utc::now(),
            }))
        }
        Ok(Err(error)) => {
            warn!(
                correlation_id = %correlation_id,
                code = error.code(),
                error = %error,
                "Upload decoding failed"
            );
            Err(error.into())
        }
        Err(join_error) => {
            warn!(correlation_id = %correlation_id, error = %join_error, "Upload processing task failed");
            Err(ApiErrorResponse::internal(ApiError::processing_error(join_error.to_string())))
        }
    }
}

/// Handler for POST /structure.
///
/// Structures a row table sent as JSON.
async fn structure_handler(
    State(state): State<AppState>,
    payload: Result<Json<StructureRequest>, JsonRejection>,
) -> Result<Json<StructureResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing structure request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return Err(ApiErrorResponse::bad_request(error));
        }
    };

    let start_time = Instant::now();
    let rows = request.rows;
    let row_count = rows.len();
    let config = state.shared_config();
    let structured = tokio::task::spawn_blocking(move || structure_payroll_with(&rows, config.structuring()))
        .await
        .map_err(|join_error| {
            warn!(correlation_id = %correlation_id, error = %join_error, "Structuring task failed");
            ApiErrorResponse::internal(ApiError::processing_error(join_error.to_string()))
        })?;
    info!(
        correlation_id = %correlation_id,
        rows = row_count,
        employees = structured.summary.total_employees,
        duration_us = start_time.elapsed().as_micros(),
        "Rows structured successfully"
    );

    Ok(Json(StructureResponse {
        success: true,
        structured,
        processed_at: Utc::now(),
    }))
}

/// Finds the `file` field and reads it whole.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiErrorResponse> {
    loop {
        let field = multipart.next_field().await.map_err(|e| multipart_error(e.status(), e.body_text()))?;
        let Some(field) = field else {
            return Err(IngestError::NoFile.into());
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;
        return Ok((filename, bytes.to_vec()));
    }
}

fn multipart_error(status: StatusCode, message: String) -> ApiErrorResponse {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        let error = ApiError::new("FILE_TOO_LARGE", "File is too large")
            .with_suggestion("Split the statement into smaller files or export only the needed period")
            .with_details(message);
        return ApiErrorResponse::bad_request(error);
    }
    ApiErrorResponse::bad_request(ApiError::new("NO_FILE", "Could not read the uploaded file").with_details(message))
}

/// Decodes and structures an upload. Runs on the blocking pool.
fn process_upload(
    filename: &str,
    bytes: &[u8],
    config: &ConfigLoader,
) -> IngestResult<(RowTable, StructuredPayroll)> {
    let rows = decode_upload(filename, bytes, config.server().max_upload_bytes)?;
    let structured = structure_payroll_with(&rows, config.structuring());
    Ok((rows, structured))
}

/// Keeps only the final path component of a client-supplied file name.
fn sanitize_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\']).next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::{EngineConfig, ServerConfig, StructuringConfig};

    const BOUNDARY: &str = "payroll-test-boundary";

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::with_defaults())
    }

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/parse-excel")
            .header("Content-Type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(create_test_state());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_csv_upload_is_structured() {
        let csv = "Código;Descrição;Referência;Calculado;Informado\n7 - ALEX MELO\n1;HORAS NORMAIS;10/2025;4.077,32;220:00\n";
        let router = create_router(create_test_state());
        let (status, json) = send(router, upload_request(multipart_body("file", "folha.csv", csv.as_bytes()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["filename"], "folha.csv");
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["structured"]["employees"][0]["name"], "ALEX MELO");
        assert_eq!(json["structured"]["summary"]["by_reference"]["10/2025"]["total_difference"], 3857.32);
        assert!(json["processedAt"].is_string());
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let router = create_router(create_test_state());
        let (status, json) = send(router, upload_request(multipart_body("other", "folha.csv", b"a;b"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], "NO_FILE");
    }

    #[tokio::test]
    async fn test_upload_with_unsupported_extension() {
        let router = create_router(create_test_state());
        let (status, json) = send(router, upload_request(multipart_body("file", "folha.pdf", b"%PDF"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], "UNSUPPORTED_FORMAT");
        assert!(json["suggestion"].is_string());
    }

    #[tokio::test]
    async fn test_upload_over_limit() {
        let server = ServerConfig {
            max_upload_bytes: 8,
            ..ServerConfig::default()
        };
        let config = ConfigLoader::from_config(EngineConfig::new(server, StructuringConfig::default())).unwrap();
        let router = create_router(AppState::new(config));

        let (status, json) = send(router, upload_request(multipart_body("file", "folha.csv", b"0123456789"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], "FILE_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_corrupt_xlsx_reports_read_error() {
        let router = create_router(create_test_state());
        let (status, json) = send(router, upload_request(multipart_body("file", "folha.xlsx", b"not a zip"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], "XLSX_READ_ERROR");
        assert!(json["details"].is_string());
    }

    #[tokio::test]
    async fn test_structure_endpoint() {
        let body = json!({
            "rows": [
                ["Código", "Descrição", "Referência", "Calculado", "Informado"],
                ["7 - ALEX MELO"],
                ["1", "HORAS NORMAIS", "10/2025", 4077.32, "220:00"]
            ]
        });
        let request = Request::builder()
            .method("POST")
            .uri("/structure")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, json) = send(create_router(create_test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["structured"]["employees"][0]["events"][0]["values"]["10/2025"]["informed"], 220.0);
    }

    #[tokio::test]
    async fn test_structure_many_employees() {
        let mut rows = vec![json!(["Código", "Descrição", "Referência", "Calculado", "Informado", "Tipo"])];
        for employee in 1..=300 {
            rows.push(json!([format!("{employee} - EMPREGADO {employee}")]));
            rows.push(json!(["1", "SALARIO", "10/2025", "1.000,00", "1.000,00", "P"]));
            rows.push(json!(["20", "INSS", "10/2025", "100,00", "90,00", true]));
        }
        let request = Request::builder()
            .method("POST")
            .uri("/structure")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "rows": rows }).to_string()))
            .unwrap();

        let (status, json) = send(create_router(create_test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["structured"]["summary"]["total_employees"], 300);
        // a boolean type cell is not a provento
        assert_eq!(json["structured"]["employees"][0]["events"][1]["values"]["10/2025"]["calculated"], -100.0);
        assert_eq!(json["structured"]["summary"]["by_reference"]["10/2025"]["total_calculated"], 270000.0);
    }

    #[tokio::test]
    async fn test_structure_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/structure")
            .header("Content-Type", "application/json")
            .body(Body::from("{ not valid json }"))
            .unwrap();

        let (status, json) = send(create_router(create_test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_structure_missing_rows() {
        let request = Request::builder()
            .method("POST")
            .uri("/structure")
            .header("Content-Type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let (status, json) = send(create_router(create_test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errorCode"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("folha.csv"), "folha.csv");
        assert_eq!(sanitize_filename("../../etc/folha.csv"), "folha.csv");
        assert_eq!(sanitize_filename("C:\\Users\\rh\\folha.xlsx"), "folha.xlsx");
    }
}
