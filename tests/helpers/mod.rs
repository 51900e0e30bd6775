// ABOUTME: Shared helpers for integration tests
// ABOUTME: Re-exports the Axum router test harness

pub mod axum_test;
