// ABOUTME: Normalizes heterogeneous classifier payloads into ranked predictions
// ABOUTME: Closed sum type over the five supported upstream response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Classifier Response Adapter
//!
//! Upstream classifiers disagree wildly about response shape: hosted vision
//! APIs return a `confidences` array, Gradio endpoints return a single
//! `label` with an optional score, local models return `[label, score]`
//! pairs, and some wrappers return a bare string. The adapter inspects the
//! raw JSON payload exactly once at this boundary and tags it as one of a
//! closed set of variants, then converts per variant.

use crate::errors::{AppError, AppResult};
use crate::models::Prediction;
use serde_json::Value;

/// Maximum number of predictions returned from one classifier call
pub const MAX_PREDICTIONS: usize = 5;

/// Confidence assigned when the upstream payload carries no score
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Tagged classifier payload shapes, in detection precedence order
#[derive(Debug, Clone, PartialEq)]
pub enum RawClassifierOutput {
    /// Mapping with a `confidences` array of `{label, confidence}` entries
    ConfidenceList(Vec<(String, f64)>),
    /// Mapping with a top-level `label` and optional `score`/`confidence`
    SingleLabel { label: String, score: Option<f64> },
    /// Array of `[label, confidence]` pairs
    TupleList(Vec<(String, f64)>),
    /// Array of mappings each carrying `label` plus `score`/`confidence`
    LabeledList(Vec<(String, f64)>),
    /// Bare string label
    Plain(String),
}

impl RawClassifierOutput {
    /// Classify a raw JSON payload into one of the supported shapes
    ///
    /// Returns `None` when the payload matches no recognized shape; the
    /// caller treats that the same as a shape that yielded no predictions.
    #[must_use]
    pub fn detect(payload: &Value) -> Option<Self> {
        if let Some(object) = payload.as_object() {
            if let Some(confidences) = object.get("confidences").and_then(Value::as_array) {
                return Some(Self::ConfidenceList(collect_labeled_entries(confidences)));
            }
            if let Some(label) = object.get("label").and_then(Value::as_str) {
                let score = object
                    .get("score")
                    .or_else(|| object.get("confidence"))
                    .and_then(value_as_f64);
                return Some(Self::SingleLabel {
                    label: label.to_owned(),
                    score,
                });
            }
            return None;
        }

        if let Some(entries) = payload.as_array() {
            // [label, confidence] pairs take precedence over dict entries
            if entries.iter().all(is_tuple_entry) && entries.iter().any(is_tuple_entry) {
                let pairs = entries
                    .iter()
                    .filter_map(|entry| {
                        let pair = entry.as_array()?;
                        let label = pair.first()?.as_str()?;
                        let confidence = pair.get(1).and_then(value_as_f64)?;
                        Some((label.to_owned(), confidence))
                    })
                    .collect();
                return Some(Self::TupleList(pairs));
            }
            if entries.iter().any(Value::is_object) {
                return Some(Self::LabeledList(collect_labeled_entries(entries)));
            }
            return None;
        }

        payload.as_str().map(|s| Self::Plain(s.to_owned()))
    }

    /// Convert this tagged payload into an ordered prediction list
    #[must_use]
    pub fn into_predictions(self, max_results: usize) -> Vec<Prediction> {
        let pairs: Vec<(String, f64)> = match self {
            Self::ConfidenceList(pairs) | Self::TupleList(pairs) | Self::LabeledList(pairs) => {
                pairs
            }
            Self::SingleLabel { label, score } => {
                vec![(label, score.unwrap_or(DEFAULT_CONFIDENCE))]
            }
            Self::Plain(label) => vec![(label, DEFAULT_CONFIDENCE)],
        };

        pairs
            .into_iter()
            .filter(|(label, _)| !label.is_empty())
            .take(max_results)
            .map(|(label, confidence)| Prediction::from_raw(label, confidence))
            .collect()
    }
}

/// Extract `{label, confidence-or-score}` pairs from an array of mappings
fn collect_labeled_entries(entries: &[Value]) -> Vec<(String, f64)> {
    entries
        .iter()
        .filter_map(|entry| {
            let object = entry.as_object()?;
            let label = object
                .get("label")
                .or_else(|| object.get("name"))
                .and_then(Value::as_str)?;
            let confidence = object
                .get("confidence")
                .or_else(|| object.get("score"))
                .or_else(|| object.get("value"))
                .and_then(value_as_f64)?;
            Some((label.to_owned(), confidence))
        })
        .collect()
}

/// True when the entry looks like a `[label, confidence]` pair
fn is_tuple_entry(entry: &Value) -> bool {
    entry.as_array().is_some_and(|pair| {
        pair.len() == 2 && pair[0].is_string() && pair.get(1).and_then(value_as_f64).is_some()
    })
}

/// Coerce a JSON number or numeric string to f64
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Normalize one raw classifier payload into ranked predictions
///
/// Input order is preserved (upstream already ranks by descending
/// confidence; exact duplicates keep upstream order), and the result is
/// truncated to `max_results`.
///
/// # Errors
///
/// Returns [`crate::errors::ErrorCode::EmptyPrediction`] when no prediction
/// could be extracted from any recognized shape. This is a user-visible "no
/// ingredients detected" condition and must not be swallowed.
pub fn adapt_response(payload: &Value, max_results: usize) -> AppResult<Vec<Prediction>> {
    let predictions = RawClassifierOutput::detect(payload)
        .map(|output| output.into_predictions(max_results))
        .unwrap_or_default();

    if predictions.is_empty() {
        return Err(AppError::empty_prediction());
    }

    Ok(predictions)
}
