// ABOUTME: Label string cleanup for classifier output
// ABOUTME: Strips parenthetical suffixes and underscores, applies title casing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! Display-name normalization for raw classifier labels.

/// Clean a raw classifier label into a human-readable display name
///
/// The transformation, in order:
/// 1. Truncate at the first `"_("` occurrence, dropping the disambiguation
///    suffix entirely (`"rice_(white,_grain)"` becomes `"rice"`).
/// 2. Replace remaining underscores with spaces.
/// 3. Title-case each whitespace-separated word.
///
/// Total over any input; the empty string maps to itself. Idempotent, since
/// normalized names contain neither underscores nor `"_("`.
#[must_use]
pub fn display_name(raw: &str) -> String {
    let truncated = match raw.find("_(") {
        Some(index) => &raw[..index],
        None => raw,
    };

    let spaced = truncated.replace('_', " ");

    spaced
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word, lowercase the rest
fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
