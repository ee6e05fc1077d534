//! Valuation engine.
//!
//! Runs a requested subset of valuation methods against one resolved
//! snapshot and folds the survivors into a recommendation.
//!
//! # Partial failure
//!
//! Methods are independent: one method's error (missing input, divergent
//! growth, bad assumption) is logged and drops only that method. The batch
//! itself fails only on request-level problems, surfaced before any method
//! runs. A batch where every method failed is still a valid result with
//! zero outcomes; synthesis degrades to its insufficient-data answer.
//!
//! # Determinism
//!
//! Valuators are pure over their inputs. Two calls with identical inputs
//! produce bit-identical outcome numerics; timestamps and trace ids live in
//! the service envelope, never in here.

pub mod assumptions;
pub mod error;
pub mod methods;
pub mod projection;
pub mod synthesis;
pub mod types;

pub use error::ValuationError;
pub use types::{
    FinancialSnapshot, MarketContext, Recommendation, ValuationBatchResult,
    ValuationMethod, ValuationOutcome,
};

use std::collections::HashMap;

use analyst_common::config::Config;
use futures::future;

use crate::engine::assumptions::DcfAssumptions;
use crate::engine::methods::{
    ComparativeValuator, DcfValuator, PeValuator, PegValuator, Valuator,
};

/// Multi-method valuation engine.
///
/// The method set is closed; each strategy is constructed once and shared
/// across requests. Strategies hold no mutable state, so concurrent batches
/// need no locking.
pub struct ValuationEngine {
    dcf: DcfValuator,
    peg: PegValuator,
    pe: PeValuator,
    comparative: ComparativeValuator,
}

impl ValuationEngine {
    /// Create an engine, folding service configuration into the DCF
    /// defaults.
    pub fn new(config: &Config) -> Self {
        let dcf_defaults = DcfAssumptions::from_config(config.engine.as_ref());

        Self {
            dcf: DcfValuator::new(dcf_defaults),
            peg: PegValuator,
            pe: PeValuator,
            comparative: ComparativeValuator,
        }
    }

    /// Run the requested methods against one snapshot.
    ///
    /// Methods settle independently; outcome order mirrors the requested
    /// order with failed methods skipped in place.
    pub async fn evaluate(
        &self,
        symbol: &str,
        methods: &[ValuationMethod],
        snapshot: &FinancialSnapshot,
        context: &MarketContext,
        overrides: Option<&HashMap<String, f64>>,
    ) -> Result<ValuationBatchResult, ValuationError> {
        if methods.is_empty() {
            return Err(ValuationError::NoMethodsRequested);
        }

        let no_overrides = HashMap::new();
        let overrides = overrides.unwrap_or(&no_overrides);

        let runs = methods.iter().map(|&method| async move {
            let result = self.valuator(method).value(snapshot, context, overrides);
            (method, result)
        });
        let settled = future::join_all(runs).await;

        let mut outcomes = Vec::with_capacity(settled.len());
        for (method, result) in settled {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    tracing::warn!(
                        symbol = %symbol,
                        method = %method,
                        error = %error,
                        "Valuation method failed, continuing batch"
                    );
                }
            }
        }

        let recommendation = synthesis::recommend(&outcomes, snapshot.current_price);
        let risk_factors = synthesis::risk_factors(snapshot, context);

        Ok(ValuationBatchResult {
            symbol: symbol.to_string(),
            current_price: snapshot.current_price,
            outcomes,
            recommendation,
            risk_factors,
        })
    }

    fn valuator(&self, method: ValuationMethod) -> &dyn Valuator {
        match method {
            ValuationMethod::Dcf => &self.dcf,
            ValuationMethod::Peg => &self.peg,
            ValuationMethod::Pe => &self.pe,
            ValuationMethod::Comparative => &self.comparative,
        }
    }
}
