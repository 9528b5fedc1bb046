//! Engine error kinds.
//!
//! The engine fails fast: a single invalid run aborts the whole invocation,
//! since the conservation rescaling step needs a complete run set.

use thiserror::Error;

/// Errors produced by the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Non-positive run count, or scenario parameters that fail validation
    /// (e.g. vehicle-type shares not summing to 1 within tolerance).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The conservation-rescaling denominator is zero or non-finite.
    #[error("degenerate model: {0}")]
    DegenerateModel(String),

    /// An intermediate value became non-finite (e.g. a misconfigured
    /// occupancy ceiling at or below the baseline occupancy).
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
}
