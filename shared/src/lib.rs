//! Body Metrics Shared Library
//!
//! The pure calculator core used by the WASM bindings and the native form
//! orchestration: unit normalization and the metabolic estimator.

pub mod errors;
pub mod health_metrics;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use units::*;
pub use validation::RawField;
