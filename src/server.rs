use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::AnalysisError;
use crate::handlers::AnalysisHandler;
use crate::models::{escape_html, CalorieEstimate, MealAnalysis, MealImage, NO_CONTENT_MESSAGE};

const DEFAULT_UPLOAD_MIME: &str = "image/jpeg";

pub struct AppState {
    pub handler: Arc<AnalysisHandler>,
}

#[derive(Debug, Serialize)]
struct AnalysisBody<'a> {
    #[serde(flatten)]
    analysis: &'a MealAnalysis,
    html: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    calorie_display: &'static str,
}

pub fn create_router(handler: Arc<AnalysisHandler>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { handler });

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

/// Raw image bytes in the body, MIME type from `Content-Type`
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.starts_with("image/"))
        .unwrap_or(DEFAULT_UPLOAD_MIME)
        .to_string();

    log::info!("📨 Upload received: {} bytes ({})", body.len(), mime_type);

    let image = match MealImage::new(body.to_vec(), mime_type) {
        Ok(image) => image,
        Err(e) => return error_response(e),
    };

    match state.handler.analyze_image(Some(image)).await {
        Ok(analysis) => {
            let html = render_html(&analysis);
            let body = AnalysisBody {
                analysis: &analysis,
                html,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn render_html(analysis: &MealAnalysis) -> String {
    if analysis.paragraphs.is_empty() {
        return format!("<p>{}</p>", escape_html(NO_CONTENT_MESSAGE));
    }

    analysis.paragraphs.iter().map(|p| p.to_html()).collect()
}

fn error_response(error: AnalysisError) -> Response {
    log::error!("❌ Analysis failed: {}", error);

    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorBody {
        error: error.to_string(),
        calorie_display: CalorieEstimate::PLACEHOLDER,
    };

    (status, Json(body)).into_response()
}

async fn root_handler() -> &'static str {
    "Meal Calorie Estimator - POST an image to /api/analyze"
}

async fn health_check() -> &'static str {
    "OK"
}
