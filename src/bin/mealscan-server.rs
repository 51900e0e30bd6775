// ABOUTME: Server binary wiring external backends into the HTTP boundary
// ABOUTME: Environment-driven startup with Clarifai, nutrition, and Gemini clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # MealScan Server Binary
//!
//! Starts the food identification HTTP service. Backends are constructed
//! once here and injected into the pipeline; the classifier handle is
//! shared read-only across requests.

use anyhow::{Context, Result};
use clap::Parser;
use mealscan::{
    advice::GeminiGenerator,
    classifier::ClarifaiBackend,
    config::ServiceConfig,
    http_client, logging,
    nutrition::NutritionClient,
    pipeline::FoodPipeline,
    routes::{router, ServerState},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mealscan-server")]
#[command(about = "MealScan - food identification and dietary advice service")]
struct Args {
    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServiceConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting MealScan server");
    info!("{}", config.summary());

    // Shared HTTP client must be configured before any backend call
    http_client::initialize_shared_client(
        config.http_timeout_secs,
        config.http_connect_timeout_secs,
    );

    let classifier = Arc::new(ClarifaiBackend::from_env().context("classifier configuration")?);
    let nutrition = Arc::new(NutritionClient::from_env());
    let generator = Arc::new(GeminiGenerator::from_env().context("generator configuration")?);

    let pipeline = FoodPipeline::new(classifier, nutrition, generator);
    let state = Arc::new(ServerState::new(pipeline));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Resolve on Ctrl-C so in-flight requests can drain
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
