//! HTTP handlers.
//!
//! One health endpoint and one extraction endpoint. All responses are
//! wrapped in [`ApiResponse`] envelopes.

use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::info;

use crate::api::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::pipeline::{ConfidenceReport, FinalResult};

/// Uploads above this size are rejected before decoding.
pub const MAX_FILE_SIZE: usize = 25 * 1024 * 1024;

/// Health data returned inside the envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub ocr: OcrStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Extraction payload returned inside the envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ExtractData {
    /// Original filename of the upload, when the client supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub text: String,
    pub confidence: ConfidenceReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl ExtractData {
    fn from_result(result: FinalResult, filename: Option<String>) -> Self {
        Self {
            filename,
            text: result.text,
            confidence: result.confidence,
            strategy: result.strategy,
        }
    }
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let ocr = if state.engine.is_available() {
        OcrStatus {
            status: "available".to_string(),
            languages: Some(state.engine.languages().to_string()),
            reason: None,
        }
    } else {
        OcrStatus {
            status: "unavailable".to_string(),
            languages: None,
            reason: state.engine.unavailable_reason().map(str::to_string),
        }
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr,
    })
}

/// `POST /api/v1/extract`
///
/// Accepts a multipart form with a `file` field and an optional `language`
/// field overriding the configured Tesseract languages.
#[utoipa::path(
    post,
    path = "/api/v1/extract",
    tag = "extract",
    request_body(content_type = "multipart/form-data", content = String, description = "Image upload with optional language field"),
    responses(
        (status = 200, description = "Extraction result", body = ExtractData),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 503, description = "OCR engine unavailable", body = ApiError),
    )
)]
pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<ExtractData> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut language: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                if let Some(name) = field.file_name() {
                    file_name = Some(name.to_string());
                }

                let bytes = match field.bytes().await {
                    Ok(b) => b,
                    Err(e) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            format!("Failed to read file: {e}"),
                        );
                    }
                };

                if bytes.len() > MAX_FILE_SIZE {
                    return ApiResponse::error(
                        ErrorCode::InvalidRequest,
                        format!(
                            "File too large: {} bytes (max {} bytes)",
                            bytes.len(),
                            MAX_FILE_SIZE
                        ),
                    );
                }

                file_bytes = Some(bytes.to_vec());
            }
            "language" => {
                language = match field.text().await {
                    Ok(t) if t.trim().is_empty() => None,
                    Ok(t) => Some(t.trim().to_string()),
                    Err(e) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            format!("Invalid language value: {e}"),
                        );
                    }
                };
            }
            _ => {}
        }
    }

    let bytes = match file_bytes {
        Some(b) => b,
        None => {
            return ApiResponse::error(ErrorCode::InvalidRequest, "Missing required 'file' field");
        }
    };

    info!(
        filename = file_name.as_deref().unwrap_or("<unnamed>"),
        size = bytes.len(),
        "extraction upload received"
    );

    match state.pipeline.extract(bytes, language).await {
        Ok(result) => ApiResponse::success(ExtractData::from_result(result, file_name)),
        Err(e) => e.into(),
    }
}
