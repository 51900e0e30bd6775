// ABOUTME: Unified error handling with error codes and HTTP response formatting
// ABOUTME: Maps pipeline stage failures to user-visible statuses and JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Unified Error Handling
//!
//! Centralized error types for the food identification pipeline. Each error
//! carries an [`ErrorCode`] that determines its HTTP status; the response
//! body is the legacy `{"error": <message>}` shape the front end expects.
//!
//! Soft stage failures (nutrition lookup, advice synthesis) are deliberately
//! NOT part of this taxonomy: they degrade to `None` inside the pipeline and
//! never surface as user-visible errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Request carried no image payload
    #[serde(rename = "NO_IMAGE_PROVIDED")]
    NoImageProvided,
    /// Classifier produced no usable prediction
    #[serde(rename = "EMPTY_PREDICTION")]
    EmptyPrediction,
    /// Malformed input (bad base64, invalid request body)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Classifier backend unreachable or misconfigured (fatal to the request)
    #[serde(rename = "CLASSIFIER_BACKEND_ERROR")]
    ClassifierBackendError,
    /// A non-classifier external service failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// Required configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            // 400 Bad Request: input validation and classifier-empty failures
            Self::NoImageProvided | Self::EmptyPrediction | Self::InvalidInput => {
                StatusCode::BAD_REQUEST
            }
            // 502 Bad Gateway: an upstream service failed
            Self::ExternalServiceError => StatusCode::BAD_GATEWAY,
            // 500 Internal Server Error
            Self::ClassifierBackendError | Self::ConfigError | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoImageProvided => "No image was supplied with the request",
            Self::EmptyPrediction => "The classifier produced no usable predictions",
            Self::InvalidInput => "The provided input is invalid",
            Self::ClassifierBackendError => "The classifier backend failed",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Missing image payload
    #[must_use]
    pub fn no_image() -> Self {
        Self::new(ErrorCode::NoImageProvided, "No image provided")
    }

    /// Classifier yielded zero usable predictions
    #[must_use]
    pub fn empty_prediction() -> Self {
        Self::new(ErrorCode::EmptyPrediction, "No ingredients detected")
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Classifier backend failure (fatal to the request)
    pub fn classifier_backend(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ClassifierBackendError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Legacy front-end contract: flat {"error": message} body
        let status = self.http_status();
        let body = Json(json!({ "error": self.message }));
        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
