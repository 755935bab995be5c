//! HTTP API module for the Payroll Structuring Engine.
//!
//! This module exposes statement upload and structuring over HTTP:
//!
//! - `GET /health`
//! - `POST /parse-excel`, multipart upload in the `file` field
//! - `POST /structure`, JSON row table

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::StructureRequest;
pub use response::{ApiError, ApiErrorResponse, HealthResponse, ParseResponse, StructureResponse};
pub use state::AppState;
