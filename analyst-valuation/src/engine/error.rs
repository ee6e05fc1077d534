//! Valuation error types.
//!
//! Method-level errors (`MissingInput`, `DivergentGrowth`,
//! `InvalidAssumption`) are caught per method by the engine and drop only
//! that method from the batch. `NoMethodsRequested` is request-fatal and
//! surfaced before any method runs.

use thiserror::Error;

use super::types::ValuationMethod;

/// Errors raised while valuing a stock.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// A numeric field required by the method is absent from the snapshot.
    /// Absent means unknown, never zero; the method refuses to compute on a
    /// guessed value.
    #[error("{method} valuation requires {field}")]
    MissingInput {
        method: ValuationMethod,
        field: &'static str,
    },

    /// Gordon Growth Model precondition violated: the discount rate must
    /// strictly exceed the terminal growth rate.
    #[error("discount rate {discount_rate} must exceed terminal growth {terminal_growth}")]
    DivergentGrowth {
        discount_rate: f64,
        terminal_growth: f64,
    },

    /// The caller supplied an unrecognized or out-of-domain assumption
    /// override.
    #[error("invalid assumption {key:?}: {reason}")]
    InvalidAssumption { key: String, reason: String },

    /// The request named no valuation methods at all.
    #[error("at least one valuation method must be requested")]
    NoMethodsRequested,
}
