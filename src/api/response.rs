//! Response types for the Payroll Structuring Engine API.
//!
//! This module defines the success bodies, the error body and the mapping
//! from decoding errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::models::{RowTable, StructuredPayroll};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// The response of a running server.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of a successful `POST /parse-excel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Always `true`.
    pub success: bool,
    /// The decoded row table.
    pub data: RowTable,
    /// The structured statement.
    pub structured: StructuredPayroll,
    /// Sanitized name of the uploaded file.
    pub filename: String,
    /// When the statement was processed.
    #[serde(rename = "processedAt")]
    pub processed_at: DateTime<Utc>,
}

/// Body of a successful `POST /structure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureResponse {
    /// Always `true`.
    pub success: bool,
    /// The structured statement.
    pub structured: StructuredPayroll,
    /// When the statement was processed.
    #[serde(rename = "processedAt")]
    pub processed_at: DateTime<Utc>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `false`.
    pub success: bool,
    /// Error code for programmatic handling.
    #[serde(rename = "errorCode")]
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// What the user can do about it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Adds a remediation hint.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds details about the failure.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unexpected-failure error response.
    pub fn processing_error(message: impl Into<String>) -> Self {
        Self::new("PROCESSING_ERROR", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<IngestError> for ApiErrorResponse {
    fn from(error: IngestError) -> Self {
        let mut body = ApiError::new(error.code(), error.to_string());
        if let Some(suggestion) = error.suggestion() {
            body = body.with_suggestion(suggestion);
        }
        match &error {
            IngestError::XlsxRead { message } | IngestError::CorruptedFile { message } => {
                body = body.with_details(message.clone());
            }
            _ => {}
        }
        ApiErrorResponse::bad_request(body)
    }
}
