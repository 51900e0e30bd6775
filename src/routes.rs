// ABOUTME: Axum HTTP boundary for the food identification pipeline
// ABOUTME: Upload and health endpoints over shared read-only server state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # HTTP Routes
//!
//! The pipeline's only external interface: `POST /api/upload` accepting a
//! base64 image plus optional dietary goals, and `GET /api/health` for
//! liveness. Responses keep the legacy Clarifai-style envelope the front
//! end was built against.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::AppResult;
use crate::models::LegacyResponse;
use crate::pipeline::{FoodPipeline, IdentificationRequest};

/// Maximum accepted request body (base64 image plus envelope)
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared server state
pub struct ServerState {
    /// The identification pipeline with its injected backends
    pub pipeline: FoodPipeline,
}

impl ServerState {
    /// Create server state over a pipeline
    #[must_use]
    pub const fn new(pipeline: FoodPipeline) -> Self {
        Self { pipeline }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of an upload request
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64-encoded image, optionally with a data-URL prefix
    #[serde(default)]
    pub image: String,
    /// Ordered dietary goals
    #[serde(default)]
    pub dietary_goals: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service is up
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle one food identification upload
async fn upload(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<UploadRequest>,
) -> AppResult<Json<LegacyResponse>> {
    let result = state
        .pipeline
        .identify(&IdentificationRequest {
            image_base64: request.image,
            dietary_goals: request.dietary_goals,
        })
        .await?;

    info!(
        top = %result.top.display_name,
        predictions = result.predictions.len(),
        nutrition = result.nutrition.is_some(),
        advice = result.advice.is_some(),
        "Identification complete"
    );

    Ok(Json(LegacyResponse::from_result(&result)))
}

/// Liveness endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        service: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Build the application router over shared state
#[must_use]
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
