// ABOUTME: Classifier backend service provider interface with mock implementation
// ABOUTME: Defines the contract interchangeable vision backends must implement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Classifier Backend SPI
//!
//! The contract a vision backend must implement to plug into the pipeline.
//! Backends are interchangeable: the repository history swapped between a
//! hosted vision API, a hosted inference endpoint, and locally loaded
//! models while the rest of the pipeline stayed stable. A backend returns
//! its raw JSON payload untouched; shape normalization happens in
//! [`crate::classifier::adapter`].

use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;

/// Classifier backend trait
///
/// Implementations are constructed once at startup and shared read-only
/// across requests (connection/session reuse only; no cached predictions).
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Unique backend identifier (e.g., "clarifai", "mock")
    fn name(&self) -> &'static str;

    /// Classify one decoded image, returning the backend's raw payload
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ClassifierBackendError`] when the
    /// backend is unreachable or misconfigured. This failure is fatal to the
    /// request; no food was identified at all.
    async fn classify(&self, image: &[u8]) -> AppResult<Value>;
}

/// Mock classifier backend returning a canned payload (no network calls)
pub struct MockClassifierBackend {
    payload: AppResult<Value>,
}

impl MockClassifierBackend {
    /// Create a mock that returns the given payload
    #[must_use]
    pub fn with_payload(payload: Value) -> Self {
        Self {
            payload: Ok(payload),
        }
    }

    /// Create a mock that fails with the given error
    #[must_use]
    pub fn with_error(error: crate::errors::AppError) -> Self {
        Self {
            payload: Err(error),
        }
    }
}

#[async_trait]
impl ClassifierBackend for MockClassifierBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn classify(&self, _image: &[u8]) -> AppResult<Value> {
        match &self.payload {
            Ok(value) => Ok(value.clone()),
            Err(err) => Err(crate::errors::AppError::new(err.code, err.message.clone())),
        }
    }
}
