//! Method valuators.
//!
//! One implementation of [`Valuator`] per supported method. The set is
//! closed: the engine dispatches on [`ValuationMethod`] with a match, and
//! new strategies are added here, not registered at runtime.

mod comparative;
mod dcf;
mod pe;
mod peg;

pub use comparative::ComparativeValuator;
pub use dcf::DcfValuator;
pub use pe::{industry_pe_for, PeValuator, DEFAULT_INDUSTRY_PE};
pub use peg::PegValuator;

use std::collections::HashMap;

use super::error::ValuationError;
use super::types::{FinancialSnapshot, MarketContext, ValuationMethod, ValuationOutcome};

/// One valuation strategy.
///
/// Implementations are pure given their inputs: no I/O, no shared state,
/// and a fresh outcome per call, so the engine is free to run them
/// concurrently within one request.
pub trait Valuator: Send + Sync {
    /// Identifier this strategy answers to.
    fn method(&self) -> ValuationMethod;

    /// Value one stock from a resolved snapshot.
    ///
    /// The market context is accepted by every strategy for interface
    /// symmetry even where it plays no numeric role. The override map is
    /// shared across the whole batch and never mutated.
    fn value(
        &self,
        snapshot: &FinancialSnapshot,
        context: &MarketContext,
        overrides: &HashMap<String, f64>,
    ) -> Result<ValuationOutcome, ValuationError>;
}

/// Band around an estimate, ordered so `lower <= upper` even when the
/// estimate itself is negative.
pub(crate) fn confidence_band(estimate: f64, range: f64) -> (f64, f64) {
    let a = estimate * (1.0 - range);
    let b = estimate * (1.0 + range);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Treat zero the same as absent: ratios reported as 0 are placeholders
/// from upstream feeds, and computing on them divides by zero downstream.
pub(crate) fn present_non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
