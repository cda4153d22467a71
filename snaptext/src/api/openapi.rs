use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;
use crate::ocr;
use crate::pipeline;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SnapText API",
        version = "1.0.0",
        description = "Screenshot text extraction. Uploads an image, runs it through \
                       several enhancement strategies, and returns the best OCR result \
                       with a per-word confidence summary.",
    ),
    paths(handlers::health_check, handlers::extract),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        handlers::HealthData,
        handlers::OcrStatus,
        handlers::ExtractData,
        ocr::Word,
        pipeline::ConfidenceReport,
        pipeline::ConfidenceSummary,
        pipeline::FinalResult,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "extract", description = "Image text extraction"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
