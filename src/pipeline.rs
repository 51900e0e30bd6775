// ABOUTME: Sequential food identification pipeline orchestration
// ABOUTME: Decode, classify, adapt, select, enrich, synthesize, assemble
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Food Identification Pipeline
//!
//! Strictly sequential orchestration of the four stages; each depends on
//! the previous stage's output. External backends are injected explicitly
//! and shared read-only across requests; nothing else is shared, so
//! concurrent requests need no coordination. No call is retried: nutrition
//! and advice fail soft, input validation and the classifier stage fail the
//! request.

use std::sync::Arc;

use base64::Engine as _;
use tracing::{debug, instrument, warn};

use crate::advice::{synthesize_advice, AdviceRequest, TextGenerator};
use crate::classifier::{adapt_response, ClassifierBackend, MAX_PREDICTIONS};
use crate::errors::{AppError, AppResult};
use crate::models::IdentificationResult;
use crate::nutrition::NutritionLookup;
use crate::selection::select_top;

/// One identification request as received from the HTTP boundary
#[derive(Debug, Clone, Default)]
pub struct IdentificationRequest {
    /// Base64-encoded image, optionally with a data-URL prefix
    pub image_base64: String,
    /// Ordered dietary goals, possibly empty
    pub dietary_goals: Vec<String>,
}

/// The food identification pipeline with injected backends
pub struct FoodPipeline {
    classifier: Arc<dyn ClassifierBackend>,
    nutrition: Arc<dyn NutritionLookup>,
    generator: Arc<dyn TextGenerator>,
}

impl FoodPipeline {
    /// Create a pipeline over the given backends
    #[must_use]
    pub fn new(
        classifier: Arc<dyn ClassifierBackend>,
        nutrition: Arc<dyn NutritionLookup>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            classifier,
            nutrition,
            generator,
        }
    }

    /// Run the full pipeline for one request
    ///
    /// # Errors
    ///
    /// - `NoImageProvided` when the image payload is empty.
    /// - `InvalidInput` when the payload is not valid base64.
    /// - `EmptyPrediction` when the classifier yields nothing usable.
    /// - `ClassifierBackendError` when the classifier call itself fails.
    ///
    /// Nutrition and advice failures never propagate; the result carries
    /// `None` for the affected field.
    #[instrument(skip(self, request), fields(classifier = self.classifier.name()))]
    pub async fn identify(&self, request: &IdentificationRequest) -> AppResult<IdentificationResult> {
        let image = decode_image(&request.image_base64)?;

        let raw = self.classifier.classify(&image).await?;
        let predictions = adapt_response(&raw, MAX_PREDICTIONS)?;
        debug!(count = predictions.len(), "Classifier predictions adapted");

        // adapt_response guarantees a non-empty list
        let top = select_top(&predictions)
            .cloned()
            .ok_or_else(AppError::empty_prediction)?;
        debug!(top = %top.display_name, confidence = top.confidence, "Top prediction selected");

        let nutrition = self.nutrition.lookup(&top.display_name).await;
        if nutrition.is_none() {
            warn!(food = %top.display_name, "Continuing without nutrition data");
        }

        let advice = synthesize_advice(
            self.generator.as_ref(),
            &AdviceRequest {
                food_name: top.display_name.clone(),
                nutrition: nutrition.clone(),
                dietary_goals: request.dietary_goals.clone(),
            },
        )
        .await;

        Ok(IdentificationResult {
            predictions,
            top,
            nutrition,
            advice,
        })
    }
}

/// Decode the request image payload
///
/// Strips an optional `data:<mime>;base64,` prefix, then decodes base64.
///
/// # Errors
///
/// `NoImageProvided` for an empty payload, `InvalidInput` for malformed
/// base64.
pub fn decode_image(payload: &str) -> AppResult<Vec<u8>> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(AppError::no_image());
    }

    let encoded = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| AppError::invalid_input(format!("Invalid base64 image data: {e}")))
}
