//! Common test utilities for integration tests
//!
//! This module provides a session wrapper that fills the form the way a user
//! would, one field at a time.

#![allow(dead_code)]

use body_metrics_app::{config::AppConfig, CalculatorSession};
use body_metrics_shared::EstimateResult;

/// Test session wrapper
pub struct TestSession {
    pub session: CalculatorSession,
}

impl TestSession {
    /// Create a new session with default configuration
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self {
            session: CalculatorSession::new(config),
        }
    }

    /// Set a field by name, panicking on rejected updates
    pub fn set(&mut self, field: &str, value: &str) -> EstimateResult {
        *self
            .session
            .apply_raw(field, value)
            .unwrap_or_else(|e| panic!("update {}={} rejected: {}", field, value, e))
    }

    /// Type a value one character at a time, returning every intermediate result
    pub fn type_into(&mut self, field: &str, value: &str) -> Vec<EstimateResult> {
        let mut typed = String::new();
        value
            .chars()
            .map(|c| {
                typed.push(c);
                self.set(field, &typed)
            })
            .collect()
    }
}
