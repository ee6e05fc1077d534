//! Peer-comparative valuation (placeholder).
//!
//! Low-fidelity stand-in for true peer-multiple analysis: it applies a flat
//! premium to the current price instead of screening comparable companies.
//! Its wide band reflects that; do not read it as equivalent in rigor to the
//! other methods. Replacing it requires a peer universe from the
//! data-retrieval service, which only resolves single-stock snapshots today.

use std::collections::HashMap;

use super::{confidence_band, Valuator};
use crate::engine::assumptions::{check_known, ComparativeAssumptions};
use crate::engine::error::ValuationError;
use crate::engine::types::{
    CalculationDetails, FinancialSnapshot, MarketContext, ResolvedAssumptions,
    ValuationMethod, ValuationOutcome,
};

/// Flat premium over current price standing in for peer multiples.
const PEER_PREMIUM: f64 = 0.10;

/// Band width around the premium-adjusted price.
const CONFIDENCE_RANGE: f64 = 0.2;

/// Comparative strategy.
pub struct ComparativeValuator;

impl Valuator for ComparativeValuator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Comparative
    }

    fn value(
        &self,
        snapshot: &FinancialSnapshot,
        _context: &MarketContext,
        overrides: &HashMap<String, f64>,
    ) -> Result<ValuationOutcome, ValuationError> {
        check_known(overrides)?;

        let current_price = snapshot.current_price;
        let estimated_value = current_price * (1.0 + PEER_PREMIUM);

        Ok(ValuationOutcome {
            method: ValuationMethod::Comparative,
            estimated_value,
            confidence_interval: confidence_band(estimated_value, CONFIDENCE_RANGE),
            assumptions: ResolvedAssumptions::Comparative(ComparativeAssumptions {
                peer_premium: PEER_PREMIUM,
            }),
            details: CalculationDetails::Comparative {
                current_price,
                peer_premium: PEER_PREMIUM,
            },
        })
    }
}
