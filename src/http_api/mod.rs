use std::net::SocketAddr;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{CpmError, CriticalPathResult, Dependency, PersistenceError, ProjectSnapshot};

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<Vec<String>>,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Cycle(CpmError),
}

impl From<CpmError> for ApiError {
    fn from(value: CpmError) -> Self {
        ApiError::Cycle(value)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                    cycle: None,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Cycle(err) => {
                let body = Json(ErrorBody {
                    error: "circular_dependency",
                    message: err.to_string(),
                    cycle: Some(err.cycle().to_vec()),
                });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CycleCheckRequest {
    #[serde(default)]
    pub existing: Vec<Dependency>,
    pub source_id: String,
    pub target_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CycleCheckResponse {
    pub would_create_cycle: bool,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/critical-path", post(critical_path))
        .route("/dependencies/check", post(check_dependency))
}

pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "critical-path HTTP API listening");
    axum::serve(listener, router()).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn critical_path(
    Json(snapshot): Json<ProjectSnapshot>,
) -> Result<Json<CriticalPathResult>, ApiError> {
    snapshot.validate()?;
    let result = snapshot.calculate()?;
    Ok(Json(result))
}

async fn check_dependency(Json(request): Json<CycleCheckRequest>) -> Json<CycleCheckResponse> {
    let would_create_cycle =
        crate::would_create_cycle(&request.existing, &request.source_id, &request.target_id);
    Json(CycleCheckResponse { would_create_cycle })
}
