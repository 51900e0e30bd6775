// ABOUTME: Top-prediction selection with confidence tie-breaking
// ABOUTME: Excludes generic terms and prefers the most specific display name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Top-Prediction Selection
//!
//! Selects exactly one prediction as `top` using the legacy tie-break
//! policy, preserved verbatim for compatibility: collect every prediction
//! within an absolute confidence tolerance of the maximum, drop tie members
//! whose display name contains a generic term, and among the survivors
//! prefer the longest display name. When the whole tie set is generic, fall
//! back to the first tie member in original order.
//!
//! The longest-name preference is a specificity heuristic inherited from
//! the original implementation; downstream consumers may depend on its
//! exact behavior, so it is not to be "improved."

use crate::models::Prediction;

/// Absolute tolerance for treating two confidences as tied
///
/// Must match the legacy behavior exactly; do not substitute a smarter
/// epsilon.
pub const CONFIDENCE_TIE_TOLERANCE: f64 = 0.001;

/// Label substrings considered too non-specific for nutrition lookup
pub const GENERIC_TERMS: &[&str] = &["food", "dish", "meal", "plate", "cuisine"];

/// True when the display name contains any generic term (case-insensitive)
#[must_use]
pub fn is_generic(display_name: &str) -> bool {
    let lowered = display_name.to_lowercase();
    GENERIC_TERMS.iter().any(|term| lowered.contains(term))
}

/// Select the top prediction from an ordered, non-empty sequence
///
/// Returns `None` only for an empty slice; the adapter guarantees callers
/// never pass one.
#[must_use]
pub fn select_top(predictions: &[Prediction]) -> Option<&Prediction> {
    let max_confidence = predictions
        .iter()
        .map(|p| p.confidence)
        .fold(f64::NEG_INFINITY, f64::max);

    let tie_set: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| (p.confidence - max_confidence).abs() < CONFIDENCE_TIE_TOLERANCE)
        .collect();

    let mut best: Option<&Prediction> = None;
    for &candidate in &tie_set {
        if is_generic(&candidate.display_name) {
            continue;
        }
        match best {
            Some(current) if candidate.display_name.len() <= current.display_name.len() => {}
            _ => best = Some(candidate),
        }
    }

    // All tie members generic: first tie member by original order
    best.or_else(|| tie_set.first().copied())
}
