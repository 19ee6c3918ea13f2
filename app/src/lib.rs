//! Body Metrics App Library
//!
//! Native form orchestration around the calculator core: configuration,
//! logging setup, form state with unit switching, and the session that
//! recomputes the estimate after every change.

pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod telemetry;

pub use error::AppError;
pub use form::{FormFields, FormState};
pub use session::{CalculatorSession, FieldUpdate, FormSnapshot};
