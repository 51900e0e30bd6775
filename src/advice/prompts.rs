// ABOUTME: Deterministic prompt construction for dietary advice generation
// ABOUTME: Four templates branched on nutrition presence and dietary goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Advice Prompts
//!
//! Prompt construction is branched on two independent booleans: nutrition
//! facts present/absent and dietary goals present/absent, yielding four
//! templates. All four request 2-3 sentences of practical, supportive
//! advice; the goal-aware templates additionally ask the model to speak to
//! alignment with the stated goals.
//!
//! When the caller wants separately parsed suggestions, the prompt appends
//! a strictly delimited two-section format request (`ADVICE:` /
//! `SUGGESTIONS:`); see [`super::parse_advice_response`] for the fail-soft
//! parse.

use crate::models::NutritionFacts;
use std::fmt::Write as _;

/// Marker beginning the advice section in two-section responses
pub const ADVICE_MARKER: &str = "ADVICE:";

/// Marker beginning the suggestions section in two-section responses
pub const SUGGESTIONS_MARKER: &str = "SUGGESTIONS:";

/// Build the advice prompt for one identified food
///
/// `two_section` appends the delimited response-format request used when
/// the caller wants bullet suggestions parsed out separately.
#[must_use]
pub fn build_prompt(
    food_name: &str,
    nutrition: Option<&NutritionFacts>,
    dietary_goals: &[String],
    two_section: bool,
) -> String {
    let mut prompt = String::new();

    match (nutrition, dietary_goals.is_empty()) {
        (Some(facts), false) => {
            let _ = write!(
                prompt,
                "A person managing diabetes photographed their meal and it was identified as {food_name}. \
                 Nutrition facts per {serving}g serving: {calories} calories, {protein}g protein, \
                 {carbs}g carbohydrates, {fat}g fat, {fiber}g fiber, {sugar}g sugar, {sodium}mg sodium. \
                 Their dietary goals are: {goals}. \
                 In 2-3 sentences, give practical, supportive advice about eating this food, \
                 explicitly addressing how it aligns with their goals.",
                serving = facts.serving_size_g,
                calories = facts.calories,
                protein = facts.protein_g,
                carbs = facts.carbohydrates_total_g,
                fat = facts.fat_total_g,
                fiber = facts.fiber_g,
                sugar = facts.sugar_g,
                sodium = facts.sodium_mg,
                goals = dietary_goals.join(", "),
            );
        }
        (Some(facts), true) => {
            let _ = write!(
                prompt,
                "A person managing diabetes photographed their meal and it was identified as {food_name}. \
                 Nutrition facts per {serving}g serving: {calories} calories, {protein}g protein, \
                 {carbs}g carbohydrates, {fat}g fat, {fiber}g fiber, {sugar}g sugar, {sodium}mg sodium. \
                 In 2-3 sentences, give practical, supportive advice about eating this food.",
                serving = facts.serving_size_g,
                calories = facts.calories,
                protein = facts.protein_g,
                carbs = facts.carbohydrates_total_g,
                fat = facts.fat_total_g,
                fiber = facts.fiber_g,
                sugar = facts.sugar_g,
                sodium = facts.sodium_mg,
            );
        }
        (None, false) => {
            let _ = write!(
                prompt,
                "A person managing diabetes photographed their meal and it was identified as {food_name}. \
                 No nutrition data is available for this food. \
                 Their dietary goals are: {goals}. \
                 In 2-3 sentences, give practical, supportive advice about eating this food, \
                 explicitly addressing how it aligns with their goals.",
                goals = dietary_goals.join(", "),
            );
        }
        (None, true) => {
            let _ = write!(
                prompt,
                "A person managing diabetes photographed their meal and it was identified as {food_name}. \
                 No nutrition data is available for this food. \
                 In 2-3 sentences, give practical, supportive advice about eating this food.",
            );
        }
    }

    if two_section {
        let _ = write!(
            prompt,
            " Respond in exactly this format:\n\
             {ADVICE_MARKER} <your 2-3 sentences of advice>\n\
             {SUGGESTIONS_MARKER}\n\
             - <first suggestion>\n\
             - <second suggestion>\n\
             - <third suggestion>",
        );
    }

    prompt
}
