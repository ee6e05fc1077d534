//! Price/Earnings valuation against industry averages.
//!
//! Applies a sector's average multiple to the stock's EPS. The band widens
//! as the stock's own multiple drifts from the industry anchor.

use std::collections::HashMap;

use super::{confidence_band, present_non_zero, Valuator};
use crate::engine::assumptions::{check_known, PeAssumptions};
use crate::engine::error::ValuationError;
use crate::engine::types::{
    CalculationDetails, FinancialSnapshot, MarketContext, ResolvedAssumptions,
    ValuationMethod, ValuationOutcome,
};

/// Industry average P/E by sector.
const SECTOR_PE: &[(&str, f64)] = &[
    ("Technology", 25.0),
    ("Healthcare", 20.0),
    ("Finance", 15.0),
    ("Energy", 12.0),
    ("Consumer Cyclical", 18.0),
    ("Consumer Defensive", 16.0),
    ("Industrials", 17.0),
    ("Basic Materials", 14.0),
    ("Real Estate", 22.0),
    ("Communication Services", 23.0),
    ("Utilities", 19.0),
];

/// Fallback multiple for missing or unrecognized sectors.
pub const DEFAULT_INDUSTRY_PE: f64 = 18.0;

/// Industry average P/E for a sector label.
pub fn industry_pe_for(sector: Option<&str>) -> f64 {
    sector
        .and_then(|label| SECTOR_PE.iter().find(|(name, _)| *name == label))
        .map(|(_, pe)| *pe)
        .unwrap_or(DEFAULT_INDUSTRY_PE)
}

/// P/E strategy.
pub struct PeValuator;

impl Valuator for PeValuator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Pe
    }

    fn value(
        &self,
        snapshot: &FinancialSnapshot,
        _context: &MarketContext,
        overrides: &HashMap<String, f64>,
    ) -> Result<ValuationOutcome, ValuationError> {
        check_known(overrides)?;

        let current_pe = present_non_zero(snapshot.pe_ratio).ok_or(
            ValuationError::MissingInput {
                method: ValuationMethod::Pe,
                field: "pe_ratio",
            },
        )?;
        let eps = present_non_zero(snapshot.eps_or_derived()).ok_or(
            ValuationError::MissingInput {
                method: ValuationMethod::Pe,
                field: "eps",
            },
        )?;

        let industry_pe = industry_pe_for(snapshot.sector.as_deref());
        let estimated_value = industry_pe * eps;

        let range = confidence_range(current_pe, industry_pe);

        Ok(ValuationOutcome {
            method: ValuationMethod::Pe,
            estimated_value,
            confidence_interval: confidence_band(estimated_value, range),
            assumptions: ResolvedAssumptions::Pe(PeAssumptions {
                industry_pe_ratio: industry_pe,
            }),
            details: CalculationDetails::Pe {
                current_pe,
                industry_pe,
                eps,
                pe_difference: current_pe - industry_pe,
            },
        })
    }
}

/// Band width tiered by the stock's relative distance from the industry
/// multiple.
fn confidence_range(current_pe: f64, industry_pe: f64) -> f64 {
    let deviation = (current_pe - industry_pe).abs() / industry_pe;

    if deviation < 0.1 {
        0.1
    } else if deviation < 0.3 {
        0.2
    } else {
        0.3
    }
}
