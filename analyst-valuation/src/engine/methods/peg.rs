//! Price/Earnings-to-Growth valuation.
//!
//! A PEG of 1.0 is treated as fair value, so the fair P/E equals the
//! earnings growth rate (in percent) and the estimate is that multiple
//! applied to EPS. The band widens as PEG drifts from 1.0.

use std::collections::HashMap;

use super::{confidence_band, present_non_zero, Valuator};
use crate::engine::assumptions::{check_known, PegAssumptions};
use crate::engine::error::ValuationError;
use crate::engine::types::{
    CalculationDetails, FinancialSnapshot, MarketContext, ResolvedAssumptions,
    ValuationMethod, ValuationOutcome,
};

/// PEG strategy.
pub struct PegValuator;

impl Valuator for PegValuator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Peg
    }

    fn value(
        &self,
        snapshot: &FinancialSnapshot,
        _context: &MarketContext,
        overrides: &HashMap<String, f64>,
    ) -> Result<ValuationOutcome, ValuationError> {
        check_known(overrides)?;

        let pe_ratio = present_non_zero(snapshot.pe_ratio).ok_or(
            ValuationError::MissingInput {
                method: ValuationMethod::Peg,
                field: "pe_ratio",
            },
        )?;
        let earnings_growth = present_non_zero(snapshot.earnings_growth).ok_or(
            ValuationError::MissingInput {
                method: ValuationMethod::Peg,
                field: "earnings_growth",
            },
        )?;
        let eps = snapshot
            .eps_or_derived()
            .ok_or(ValuationError::MissingInput {
                method: ValuationMethod::Peg,
                field: "eps",
            })?;

        // Growth is a decimal in the snapshot; PEG convention uses percent
        let peg_ratio = pe_ratio / (earnings_growth * 100.0);
        let fair_pe_ratio = earnings_growth * 100.0;
        let estimated_value = fair_pe_ratio * eps;

        let range = confidence_range(peg_ratio);

        Ok(ValuationOutcome {
            method: ValuationMethod::Peg,
            estimated_value,
            confidence_interval: confidence_band(estimated_value, range),
            assumptions: ResolvedAssumptions::Peg(PegAssumptions::new(earnings_growth)),
            details: CalculationDetails::Peg {
                pe_ratio,
                earnings_growth,
                peg_ratio,
                fair_pe_ratio,
                eps,
            },
        })
    }
}

/// Band width tiered by how far PEG sits from fair value. Boundaries are
/// strict: a deviation of exactly 0.2 lands in the middle tier.
fn confidence_range(peg_ratio: f64) -> f64 {
    let deviation = (peg_ratio - 1.0).abs();

    if deviation < 0.2 {
        0.1
    } else if deviation < 0.5 {
        0.2
    } else {
        0.3
    }
}
