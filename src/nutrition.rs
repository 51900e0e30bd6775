// ABOUTME: Nutrition lookup client keyed by food display name
// ABOUTME: Best-effort enrichment that degrades to None on any failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Nutrition Enrichment
//!
//! One bounded-time lookup against an external nutrition API, keyed by the
//! top prediction's display name. The response is a JSON object with an
//! `items` array; the first item supplies the [`NutritionFacts`], with
//! missing fields defaulting per the data model.
//!
//! This stage never fails the request: missing credential, network error,
//! non-200 status, and an empty `items` array all degrade to `None`, and
//! the absence is observable downstream (the advice prompt switches to its
//! no-nutrition branch).

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http_client::shared_client;
use crate::models::NutritionFacts;

/// Nutrition lookup contract
///
/// Implementations must be infallible at the signature level: a failed or
/// empty lookup is `None`, never an error.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Look up nutrition facts for a food display name
    async fn lookup(&self, food_name: &str) -> Option<NutritionFacts>;
}

/// Environment variable for the nutrition API key
const NUTRITION_API_KEY_ENV: &str = "NUTRITION_API_KEY";

/// Environment variable overriding the nutrition API base URL
const NUTRITION_API_URL_ENV: &str = "NUTRITION_API_URL";

/// Default lookup endpoint (API Ninjas nutrition)
const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1/nutrition";

/// Per-request timeout for the lookup call
const LOOKUP_TIMEOUT_SECS: u64 = 6;

/// Nutrition API client configuration
#[derive(Debug, Clone)]
pub struct NutritionClientConfig {
    /// API key sent in the `X-Api-Key` header (empty disables the lookup)
    pub api_key: String,
    /// Lookup endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NutritionClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl NutritionClientConfig {
    /// Build configuration from environment variables
    ///
    /// An unset `NUTRITION_API_KEY` leaves the key empty; the client then
    /// reports no nutrition data rather than erroring.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(NUTRITION_API_KEY_ENV).unwrap_or_default(),
            base_url: env::var(NUTRITION_API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout_secs: LOOKUP_TIMEOUT_SECS,
        }
    }
}

/// Nutrition API response envelope
#[derive(Debug, Deserialize)]
struct LookupResponse {
    items: Vec<NutritionFacts>,
}

/// Nutrition lookup client
pub struct NutritionClient {
    config: NutritionClientConfig,
}

impl NutritionClient {
    /// Create a new client with the given configuration
    #[must_use]
    pub const fn new(config: NutritionClientConfig) -> Self {
        Self { config }
    }

    /// Create a client configured from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(NutritionClientConfig::from_env())
    }
}

#[async_trait]
impl NutritionLookup for NutritionClient {
    /// Returns `None` on any failure; the pipeline continues without
    /// nutrition data. Exactly one attempt is made per request.
    async fn lookup(&self, food_name: &str) -> Option<NutritionFacts> {
        if self.config.api_key.is_empty() {
            warn!("Nutrition API key not configured; skipping lookup");
            return None;
        }

        let response = shared_client()
            .get(&self.config.base_url)
            .query(&[("query", food_name)])
            .header("X-Api-Key", &self.config.api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(food = %food_name, error = %e, "Nutrition lookup request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                food = %food_name,
                status = %response.status(),
                "Nutrition API returned non-success status"
            );
            return None;
        }

        let parsed: LookupResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!(food = %food_name, error = %e, "Failed to parse nutrition response");
                return None;
            }
        };

        let facts = parsed.items.into_iter().next();
        if facts.is_none() {
            debug!(food = %food_name, "Nutrition API returned no items");
        }
        facts
    }
}

/// Mock nutrition client for testing (no API calls)
pub struct MockNutritionClient {
    facts: Option<NutritionFacts>,
}

impl MockNutritionClient {
    /// Mock that returns the given facts for any food name
    #[must_use]
    pub const fn with_facts(facts: NutritionFacts) -> Self {
        Self { facts: Some(facts) }
    }

    /// Mock that behaves like a failed or empty lookup
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { facts: None }
    }
}

#[async_trait]
impl NutritionLookup for MockNutritionClient {
    async fn lookup(&self, _food_name: &str) -> Option<NutritionFacts> {
        self.facts.clone()
    }
}
