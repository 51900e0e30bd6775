// ABOUTME: Core data model for predictions, nutrition facts, advice, and results
// ABOUTME: Includes the legacy Clarifai-style response envelope for the front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Data Model
//!
//! Request-scoped entities produced by the pipeline stages. Nothing here is
//! persisted; every value is created at request start and discarded once the
//! response is sent.

use serde::{Deserialize, Serialize};

/// One classifier-reported label with a confidence score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Label exactly as reported by the upstream classifier
    pub raw_label: String,
    /// Cleaned, human-readable name (see [`crate::classifier::labels`])
    pub display_name: String,
    /// Confidence in `[0, 1]` as reported upstream
    pub confidence: f64,
}

impl Prediction {
    /// Build a prediction from a raw label, deriving the display name
    #[must_use]
    pub fn from_raw(raw_label: impl Into<String>, confidence: f64) -> Self {
        let raw_label = raw_label.into();
        let display_name = crate::classifier::labels::display_name(&raw_label);
        Self {
            raw_label,
            display_name,
            confidence,
        }
    }
}

/// Macro-nutrient facts for one food item, per serving
///
/// Field names follow the nutrition API response so the struct deserializes
/// directly from a result item. Missing numeric fields default to 0, except
/// serving size which defaults to 100 grams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionFacts {
    /// Energy in kilocalories
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Total carbohydrates in grams
    #[serde(default)]
    pub carbohydrates_total_g: f64,
    /// Total fat in grams
    #[serde(default)]
    pub fat_total_g: f64,
    /// Dietary fiber in grams
    #[serde(default)]
    pub fiber_g: f64,
    /// Sugar in grams
    #[serde(default)]
    pub sugar_g: f64,
    /// Sodium in milligrams
    #[serde(default)]
    pub sodium_mg: f64,
    /// Serving size in grams
    #[serde(default = "default_serving_size")]
    pub serving_size_g: f64,
}

const fn default_serving_size() -> f64 {
    100.0
}

impl Default for NutritionFacts {
    fn default() -> Self {
        Self {
            calories: 0.0,
            protein_g: 0.0,
            carbohydrates_total_g: 0.0,
            fat_total_g: 0.0,
            fiber_g: 0.0,
            sugar_g: 0.0,
            sodium_mg: 0.0,
            serving_size_g: default_serving_size(),
        }
    }
}

/// Synthesized dietary advice for the top prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdviceResult {
    /// Free-text advice (2-3 sentences)
    pub advice_text: String,
    /// Separately parsed bullet suggestions, when the two-section format
    /// was requested and the response carried both markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Full outcome of one identification request
///
/// Invariant: `top` is the element of `predictions` selected by the
/// tie-break policy; nutrition and advice are attached only to `top`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentificationResult {
    /// Ranked predictions, at most [`crate::classifier::MAX_PREDICTIONS`]
    pub predictions: Vec<Prediction>,
    /// The selected top prediction
    pub top: Prediction,
    /// Nutrition facts for `top`, if the lookup succeeded
    pub nutrition: Option<NutritionFacts>,
    /// Synthesized advice for `top`, if the generation call succeeded
    pub advice: Option<AdviceResult>,
}

// ============================================================================
// Legacy Response Envelope
// ============================================================================

/// One concept entry in the legacy response
///
/// Only the first concept (the selected top prediction) carries the
/// nutrition/advice fields; all others serialize them as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyConcept {
    /// Display name of the prediction
    pub name: String,
    /// Confidence value
    pub value: f64,
    /// Nutrition facts (top concept only)
    pub nutrition: Option<NutritionFacts>,
    /// Advice text (top concept only)
    pub gemini_advice: Option<String>,
    /// Bullet suggestions (top concept only)
    pub diet_suggestions: Option<Vec<String>>,
}

/// `data` object in the legacy response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyData {
    /// Concept list ordered by confidence
    pub concepts: Vec<LegacyConcept>,
}

/// One output entry in the legacy response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyOutput {
    /// Concept container
    pub data: LegacyData,
}

/// Backward-compatible response root: `{outputs: [{data: {concepts: [...]}}]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyResponse {
    /// Single-element output list kept for front-end compatibility
    pub outputs: Vec<LegacyOutput>,
}

impl LegacyResponse {
    /// Shape an [`IdentificationResult`] into the legacy envelope
    ///
    /// The selected top prediction is emitted first so the front end, which
    /// reads `concepts[0]`, always sees the enriched concept. Remaining
    /// predictions follow in their original order.
    #[must_use]
    pub fn from_result(result: &IdentificationResult) -> Self {
        let mut concepts = Vec::with_capacity(result.predictions.len());

        concepts.push(LegacyConcept {
            name: result.top.display_name.clone(),
            value: result.top.confidence,
            nutrition: result.nutrition.clone(),
            gemini_advice: result.advice.as_ref().map(|a| a.advice_text.clone()),
            diet_suggestions: result.advice.as_ref().and_then(|a| a.suggestions.clone()),
        });

        // Skip only the one entry that became the top concept; exact
        // duplicates further down keep their slot.
        let top_index = result.predictions.iter().position(|p| p == &result.top);
        for (index, prediction) in result.predictions.iter().enumerate() {
            if Some(index) == top_index {
                continue;
            }
            concepts.push(LegacyConcept {
                name: prediction.display_name.clone(),
                value: prediction.confidence,
                nutrition: None,
                gemini_advice: None,
                diet_suggestions: None,
            });
        }

        Self {
            outputs: vec![LegacyOutput {
                data: LegacyData { concepts },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> IdentificationResult {
        let predictions = vec![
            Prediction::from_raw("grilled_salmon", 0.91),
            Prediction::from_raw("food", 0.91),
            Prediction::from_raw("rice", 0.42),
        ];
        IdentificationResult {
            top: predictions[0].clone(),
            predictions,
            nutrition: Some(NutritionFacts {
                calories: 208.0,
                protein_g: 20.4,
                ..NutritionFacts::default()
            }),
            advice: Some(AdviceResult {
                advice_text: "Salmon is a great choice.".to_owned(),
                suggestions: Some(vec!["Pair with greens".to_owned()]),
            }),
        }
    }

    #[test]
    fn test_legacy_shape_top_first_with_enrichment() {
        let response = LegacyResponse::from_result(&sample_result());
        let concepts = &response.outputs[0].data.concepts;

        assert_eq!(concepts.len(), 3);
        assert_eq!(concepts[0].name, "Grilled Salmon");
        assert!(concepts[0].nutrition.is_some());
        assert!(concepts[0].gemini_advice.is_some());
        assert!(concepts[0].diet_suggestions.is_some());

        // Lower-ranked concepts never carry enrichment
        for concept in &concepts[1..] {
            assert!(concept.nutrition.is_none());
            assert!(concept.gemini_advice.is_none());
            assert!(concept.diet_suggestions.is_none());
        }
    }

    #[test]
    fn test_legacy_serialization_emits_nulls() {
        let response = LegacyResponse::from_result(&sample_result());
        let json = serde_json::to_value(&response).expect("serializes");
        let concepts = &json["outputs"][0]["data"]["concepts"];
        assert!(concepts[1]["nutrition"].is_null());
        assert!(concepts[1]["gemini_advice"].is_null());
    }

    #[test]
    fn test_nutrition_defaults_from_sparse_json() {
        let facts: NutritionFacts = serde_json::from_str(r#"{"calories": 52.0}"#).expect("parses");
        assert!((facts.calories - 52.0).abs() < f64::EPSILON);
        assert!((facts.protein_g - 0.0).abs() < f64::EPSILON);
        assert!((facts.serving_size_g - 100.0).abs() < f64::EPSILON);
    }
}
