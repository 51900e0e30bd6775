// ABOUTME: Library root for the MealScan food identification pipeline
// ABOUTME: Wires classifier, selection, nutrition, and advice stages together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # MealScan
//!
//! A food identification pipeline for diabetes-support applications:
//! normalize heterogeneous classifier output into ranked predictions,
//! select a top prediction under an exact tie-break policy, enrich it with
//! nutrition facts, synthesize dietary advice through a text-generation
//! backend, and assemble a backward-compatible JSON response.
//!
//! ## Pipeline
//!
//! ```text
//! image -> classifier backend -> adapter -> top selection
//!       -> nutrition enrichment -> advice synthesis -> response assembly
//! ```
//!
//! Stages run strictly sequentially; nutrition and advice failures degrade
//! gracefully while classifier failures are fatal to the request. See
//! [`pipeline::FoodPipeline`] for the orchestration entry point and
//! [`routes::router`] for the HTTP boundary.

#![warn(missing_docs)]

pub mod advice;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod http_client;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod pipeline;
pub mod routes;
pub mod selection;
