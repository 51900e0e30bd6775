// ABOUTME: End-to-end pipeline tests over mock backends
// ABOUTME: Covers soft-failure degradation and the prompt branch switching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine as _;
use mealscan::advice::{MockTextGenerator, TextGenerator};
use mealscan::classifier::MockClassifierBackend;
use mealscan::errors::{AppError, AppResult, ErrorCode};
use mealscan::models::NutritionFacts;
use mealscan::nutrition::MockNutritionClient;
use mealscan::pipeline::{FoodPipeline, IdentificationRequest};
use serde_json::json;

/// Text generator that records the prompt it was handed
struct RecordingGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    response: String,
}

impl RecordingGenerator {
    fn new(response: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                prompts: prompts.clone(),
                response: response.to_owned(),
            },
            prompts,
        )
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().expect("lock").push(prompt.to_owned());
        Ok(self.response.clone())
    }
}

fn encoded_image() -> String {
    base64::engine::general_purpose::STANDARD.encode(b"fake-image-bytes")
}

fn clarifai_style_payload() -> serde_json::Value {
    json!([
        {"name": "grilled_salmon", "value": 0.91},
        {"name": "food", "value": 0.9105},
        {"name": "rice", "value": 0.42}
    ])
}

#[tokio::test]
async fn test_full_pipeline_with_all_backends_healthy() {
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(clarifai_style_payload())),
        Arc::new(MockNutritionClient::with_facts(NutritionFacts {
            calories: 208.0,
            protein_g: 20.4,
            ..NutritionFacts::default()
        })),
        Arc::new(MockTextGenerator::with_response("Salmon is a great pick.")),
    );

    let result = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: Vec::new(),
        })
        .await
        .expect("identification succeeds");

    // Tie set is {grilled_salmon, food}; the generic term loses
    assert_eq!(result.top.display_name, "Grilled Salmon");
    assert_eq!(result.predictions.len(), 3);
    assert!(result.nutrition.is_some());
    let advice = result.advice.expect("advice");
    assert_eq!(advice.advice_text, "Salmon is a great pick.");
}

#[tokio::test]
async fn test_nutrition_failure_degrades_and_switches_prompt_branch() {
    let (generator, prompts) = RecordingGenerator::new("Go easy on portions.");
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(clarifai_style_payload())),
        Arc::new(MockNutritionClient::unavailable()),
        Arc::new(generator),
    );

    let result = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: Vec::new(),
        })
        .await
        .expect("identification still succeeds");

    assert!(result.nutrition.is_none());
    assert_eq!(
        result.advice.expect("advice").advice_text,
        "Go easy on portions."
    );

    // The synthesizer must have used the no-nutrition template
    let recorded = prompts.lock().expect("lock");
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].contains("No nutrition data is available"));
    assert!(!recorded[0].contains("calories"));
}

#[tokio::test]
async fn test_goals_reach_the_prompt_and_enable_two_sections() {
    let (generator, prompts) = RecordingGenerator::new(
        "ADVICE: Solid choice for low carb.\nSUGGESTIONS:\n- Skip the rice\n- Add greens",
    );
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(clarifai_style_payload())),
        Arc::new(MockNutritionClient::unavailable()),
        Arc::new(generator),
    );

    let result = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: vec!["low carb".to_owned()],
        })
        .await
        .expect("identification succeeds");

    let advice = result.advice.expect("advice");
    assert_eq!(advice.advice_text, "Solid choice for low carb.");
    assert_eq!(
        advice.suggestions,
        Some(vec!["Skip the rice".to_owned(), "Add greens".to_owned()])
    );

    let recorded = prompts.lock().expect("lock");
    assert!(recorded[0].contains("low carb"));
    assert!(recorded[0].contains("ADVICE:"));
    assert!(recorded[0].contains("SUGGESTIONS:"));
}

#[tokio::test]
async fn test_advice_failure_keeps_predictions_and_nutrition() {
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(clarifai_style_payload())),
        Arc::new(MockNutritionClient::with_facts(NutritionFacts::default())),
        Arc::new(MockTextGenerator::failing()),
    );

    let result = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: Vec::new(),
        })
        .await
        .expect("identification succeeds");

    assert!(result.advice.is_none());
    assert!(result.nutrition.is_some());
    assert_eq!(result.predictions.len(), 3);
}

#[tokio::test]
async fn test_empty_image_is_fatal() {
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(clarifai_style_payload())),
        Arc::new(MockNutritionClient::unavailable()),
        Arc::new(MockTextGenerator::failing()),
    );

    let err = pipeline
        .identify(&IdentificationRequest::default())
        .await
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::NoImageProvided);
}

#[tokio::test]
async fn test_zero_predictions_is_fatal() {
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_payload(json!([]))),
        Arc::new(MockNutritionClient::unavailable()),
        Arc::new(MockTextGenerator::failing()),
    );

    let err = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: Vec::new(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::EmptyPrediction);
    assert_eq!(err.message, "No ingredients detected");
}

#[tokio::test]
async fn test_classifier_backend_failure_is_fatal() {
    let pipeline = FoodPipeline::new(
        Arc::new(MockClassifierBackend::with_error(
            AppError::classifier_backend("connection refused"),
        )),
        Arc::new(MockNutritionClient::unavailable()),
        Arc::new(MockTextGenerator::failing()),
    );

    let err = pipeline
        .identify(&IdentificationRequest {
            image_base64: encoded_image(),
            dietary_goals: Vec::new(),
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::ClassifierBackendError);
}
