// ABOUTME: Environment-only service configuration
// ABOUTME: Collects host, port, and shared HTTP timeout settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealScan Contributors

//! # Service Configuration
//!
//! Configuration is environment-only; there is no config file. Per-client
//! settings (Clarifai PAT, nutrition API key, Gemini key/model) live with
//! their clients and are read via each client's `from_env`. This module
//! covers the server-level knobs.

use std::env;

/// Default HTTP bind host
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
const DEFAULT_PORT: u16 = 8080;

/// Default shared HTTP client timeout in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default shared HTTP client connect timeout in seconds
const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Server-level configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Shared HTTP client request timeout in seconds
    pub http_timeout_secs: u64,
    /// Shared HTTP client connect timeout in seconds
    pub http_connect_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            http_connect_timeout_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Build configuration from environment variables
    ///
    /// Recognized variables: `HOST`, `PORT`, `HTTP_TIMEOUT_SECS`,
    /// `HTTP_CONNECT_TIMEOUT_SECS`. Unset or unparseable values fall back
    /// to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            http_connect_timeout_secs: env::var("HTTP_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_connect_timeout_secs),
        }
    }

    /// One-line summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "bind={}:{} http_timeout={}s connect_timeout={}s",
            self.host, self.port, self.http_timeout_secs, self.http_connect_timeout_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        env::remove_var("HOST");
        env::remove_var("PORT");
        let config = ServiceConfig::from_env();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "9090");
        let config = ServiceConfig::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        env::remove_var("HOST");
        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_unparseable_port_falls_back() {
        env::set_var("PORT", "not-a-port");
        let config = ServiceConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        env::remove_var("PORT");
    }
}
