// ABOUTME: Advice synthesis stage - text generator SPI, prompt branching, parsing
// ABOUTME: Turns the top prediction plus optional nutrition and goals into advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Advice Synthesizer
//!
//! Builds a deterministic prompt from the top prediction, optional
//! nutrition facts, and optional dietary goals, forwards it to a text
//! generation backend, and parses the response. Generation failures are
//! soft: the pipeline continues with `advice = None`.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiGenerator;
pub use prompts::{build_prompt, ADVICE_MARKER, SUGGESTIONS_MARKER};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{AdviceResult, NutritionFacts};

/// Ephemeral input to the synthesizer
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    /// Display name of the identified food
    pub food_name: String,
    /// Nutrition facts, when enrichment succeeded
    pub nutrition: Option<NutritionFacts>,
    /// User dietary goals, in the order supplied
    pub dietary_goals: Vec<String>,
}

/// Text generation contract
///
/// Implement this to plug a generation backend into the synthesizer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Unique backend identifier (e.g., "gemini", "mock")
    fn name(&self) -> &'static str;

    /// Generate free text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails; the synthesizer
    /// converts any such failure into an absent advice result.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Mock text generator for testing (no API calls)
pub struct MockTextGenerator {
    response: Result<String, ()>,
}

impl MockTextGenerator {
    /// Mock that returns the given text for any prompt
    #[must_use]
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// Mock that behaves like a failed generation call
    #[must_use]
    pub const fn failing() -> Self {
        Self { response: Err(()) }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.response
            .clone()
            .map_err(|()| AppError::external_service("mock", "generation failed"))
    }
}

/// Synthesize advice for one identified food
///
/// Builds the prompt (branching on nutrition and goals), calls the
/// generation backend once, and parses the response. Two-section mode is
/// used when dietary goals are present. Returns `None` on any backend
/// failure; the identification result is still returned upstream with
/// predictions and nutrition intact.
pub async fn synthesize_advice(
    generator: &dyn TextGenerator,
    request: &AdviceRequest,
) -> Option<AdviceResult> {
    let two_section = !request.dietary_goals.is_empty();
    let prompt = build_prompt(
        &request.food_name,
        request.nutrition.as_ref(),
        &request.dietary_goals,
        two_section,
    );

    match generator.generate(&prompt).await {
        Ok(text) => {
            debug!(backend = generator.name(), "Advice generated");
            Some(parse_advice_response(&text))
        }
        Err(e) => {
            warn!(backend = generator.name(), error = %e, "Advice generation failed");
            None
        }
    }
}

/// Parse a generation response into advice text and optional suggestions
///
/// Locates the literal `ADVICE:` and `SUGGESTIONS:` markers. When both are
/// present in order, the text between them becomes the advice and the
/// bulleted lines after `SUGGESTIONS:` become the suggestion list. Missing,
/// duplicated, or out-of-order markers fall soft: the entire response is
/// advice text with no suggestions. This never errors.
#[must_use]
pub fn parse_advice_response(text: &str) -> AdviceResult {
    let advice_pos = text.find(ADVICE_MARKER);
    let suggestions_pos = text.find(SUGGESTIONS_MARKER);

    let (advice_text, suggestions) = match (advice_pos, suggestions_pos) {
        (Some(a), Some(s)) if a < s => {
            let advice = text[a + ADVICE_MARKER.len()..s].trim().to_owned();
            let bullets = parse_bullets(&text[s + SUGGESTIONS_MARKER.len()..]);
            let suggestions = if bullets.is_empty() {
                None
            } else {
                Some(bullets)
            };
            (advice, suggestions)
        }
        _ => (text.trim().to_owned(), None),
    };

    AdviceResult {
        advice_text,
        suggestions,
    }
}

/// Collect bulleted lines (`-`, `*`, or `•` prefixes) from a section
fn parse_bullets(section: &str) -> Vec<String> {
    section
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let content = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .or_else(|| trimmed.strip_prefix("\u{2022} "))
                .or_else(|| trimmed.strip_prefix('-'))
                .or_else(|| trimmed.strip_prefix('*'))?;
            let content = content.trim();
            if content.is_empty() {
                None
            } else {
                Some(content.to_owned())
            }
        })
        .collect()
}
