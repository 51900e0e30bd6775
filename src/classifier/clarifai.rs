// ABOUTME: Clarifai food-item recognition backend over the v2 REST API
// ABOUTME: PAT-authenticated POST with base64 image payload and concept extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Clarifai Backend
//!
//! Implementation of [`ClassifierBackend`] for Clarifai's hosted
//! `food-item-v1-recognition` model.
//!
//! ## Configuration
//!
//! Set the `CLARIFAI_PAT` environment variable with a personal access token
//! from the Clarifai portal.

use std::env;

use async_trait::async_trait;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::backend::ClassifierBackend;
use crate::errors::{AppError, AppResult};
use crate::http_client::shared_client;

/// Environment variable for the Clarifai personal access token
const CLARIFAI_PAT_ENV: &str = "CLARIFAI_PAT";

/// Default model endpoint
const DEFAULT_MODEL_URL: &str =
    "https://api.clarifai.com/v2/models/food-item-v1-recognition/outputs";

/// Clarifai backend configuration
#[derive(Debug, Clone)]
pub struct ClarifaiConfig {
    /// Personal access token
    pub pat: String,
    /// Model outputs endpoint
    pub model_url: String,
}

impl Default for ClarifaiConfig {
    fn default() -> Self {
        Self {
            pat: String::new(),
            model_url: DEFAULT_MODEL_URL.to_owned(),
        }
    }
}

/// Clarifai food recognition backend
pub struct ClarifaiBackend {
    config: ClarifaiConfig,
}

impl ClarifaiBackend {
    /// Create a backend with the given configuration
    #[must_use]
    pub const fn new(config: ClarifaiConfig) -> Self {
        Self { config }
    }

    /// Create a backend from the `CLARIFAI_PAT` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> AppResult<Self> {
        let pat = env::var(CLARIFAI_PAT_ENV).map_err(|_| {
            AppError::config(format!("{CLARIFAI_PAT_ENV} environment variable not set"))
        })?;
        Ok(Self::new(ClarifaiConfig {
            pat,
            ..ClarifaiConfig::default()
        }))
    }

    /// Build the v2 outputs request body for one image
    fn build_request(image: &[u8]) -> Value {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        json!({
            "user_app_id": { "user_id": "clarifai", "app_id": "main" },
            "inputs": [{ "data": { "image": { "base64": encoded } } }]
        })
    }

    /// Reduce the Clarifai envelope to the concept list the adapter expects
    ///
    /// Concepts arrive as `{name, value}` mappings under
    /// `outputs[0].data.concepts`; missing paths reduce to an empty array,
    /// which the adapter reports as an empty-prediction failure.
    fn extract_concepts(response: &Value) -> Value {
        response
            .pointer("/outputs/0/data/concepts")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }
}

#[async_trait]
impl ClassifierBackend for ClarifaiBackend {
    fn name(&self) -> &'static str {
        "clarifai"
    }

    async fn classify(&self, image: &[u8]) -> AppResult<Value> {
        let body = Self::build_request(image);

        debug!(model_url = %self.config.model_url, "Sending image to Clarifai");

        let response = shared_client()
            .post(&self.config.model_url)
            .header("Authorization", format!("Key {}", self.config.pat))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::classifier_backend(format!("Clarifai request failed: {e}")))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::classifier_backend(format!("Failed to read Clarifai response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Clarifai API error");
            return Err(AppError::classifier_backend(format!(
                "Clarifai API error ({status}): {response_text}"
            )));
        }

        let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Clarifai response");
            AppError::classifier_backend(format!("Failed to parse Clarifai response: {e}"))
        })?;

        Ok(Self::extract_concepts(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_concepts_from_envelope() {
        let response = json!({
            "outputs": [{
                "data": {
                    "concepts": [
                        {"name": "pizza", "value": 0.97},
                        {"name": "cheese", "value": 0.91}
                    ]
                }
            }]
        });
        let concepts = ClarifaiBackend::extract_concepts(&response);
        let entries = concepts.as_array().expect("array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "pizza");
    }

    #[test]
    fn test_extract_concepts_missing_path_is_empty() {
        let concepts = ClarifaiBackend::extract_concepts(&json!({"status": "ok"}));
        assert_eq!(concepts, Value::Array(Vec::new()));
    }

    #[test]
    fn test_build_request_embeds_base64() {
        let body = ClarifaiBackend::build_request(b"img-bytes");
        let encoded = body
            .pointer("/inputs/0/data/image/base64")
            .and_then(Value::as_str)
            .expect("base64 field");
        assert_eq!(
            encoded,
            base64::engine::general_purpose::STANDARD.encode(b"img-bytes")
        );
    }
}
