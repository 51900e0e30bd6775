// ABOUTME: Classifier stage - backend SPI, payload adapter, and label cleanup
// ABOUTME: Normalizes any supported upstream response into ranked predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Classifier Stage
//!
//! Everything between the raw image and a ranked [`crate::models::Prediction`]
//! list:
//!
//! - [`backend`]: the [`ClassifierBackend`] trait vision backends implement.
//! - [`clarifai`]: hosted Clarifai food recognition backend.
//! - [`adapter`]: one-shot structural dispatch over the supported payload
//!   shapes.
//! - [`labels`]: raw-label to display-name cleanup.

pub mod adapter;
pub mod backend;
pub mod clarifai;
pub mod labels;

pub use adapter::{adapt_response, RawClassifierOutput, DEFAULT_CONFIDENCE, MAX_PREDICTIONS};
pub use backend::{ClassifierBackend, MockClassifierBackend};
pub use clarifai::{ClarifaiBackend, ClarifaiConfig};
