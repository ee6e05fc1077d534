//! Discounted Cash Flow valuation.
//!
//! Projects free cash flow over a configurable horizon, adds a Gordon
//! Growth terminal value, discounts everything to present value, and
//! converts enterprise value to a per-share equity estimate.

use std::collections::HashMap;

use super::{confidence_band, Valuator};
use crate::engine::assumptions::DcfAssumptions;
use crate::engine::error::ValuationError;
use crate::engine::projection::{discount_series, project_cash_flows, terminal_value};
use crate::engine::types::{
    CalculationDetails, FinancialSnapshot, MarketContext, ResolvedAssumptions,
    ValuationMethod, ValuationOutcome,
};

/// Fixed band width. Unlike the PEG and P/E tiers this does not scale with
/// input uncertainty; the inconsistency is deliberate and documented rather
/// than unified.
const CONFIDENCE_RANGE: f64 = 0.2;

/// DCF strategy.
pub struct DcfValuator {
    defaults: DcfAssumptions,
}

impl DcfValuator {
    /// Create a DCF valuator with the given default assumptions.
    pub fn new(defaults: DcfAssumptions) -> Self {
        Self { defaults }
    }
}

impl Valuator for DcfValuator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::Dcf
    }

    fn value(
        &self,
        snapshot: &FinancialSnapshot,
        _context: &MarketContext,
        overrides: &HashMap<String, f64>,
    ) -> Result<ValuationOutcome, ValuationError> {
        let assumptions = self.defaults.resolve(overrides)?;

        let free_cash_flow =
            snapshot
                .free_cash_flow
                .ok_or(ValuationError::MissingInput {
                    method: ValuationMethod::Dcf,
                    field: "free_cash_flow",
                })?;

        // Terminal-value precondition, checked before any projection work
        if assumptions.discount_rate <= assumptions.terminal_growth {
            return Err(ValuationError::DivergentGrowth {
                discount_rate: assumptions.discount_rate,
                terminal_growth: assumptions.terminal_growth,
            });
        }

        let projected_cash_flows = project_cash_flows(
            free_cash_flow,
            assumptions.growth_rate,
            assumptions.projection_years,
        );
        let Some(&final_flow) = projected_cash_flows.last() else {
            return Err(ValuationError::InvalidAssumption {
                key: "projection_years".into(),
                reason: "must project at least one year".into(),
            });
        };

        let terminal = terminal_value(
            final_flow,
            assumptions.terminal_growth,
            assumptions.discount_rate,
        )?;

        let present_value_cash_flows =
            discount_series(&projected_cash_flows, assumptions.discount_rate);
        let present_value_terminal = terminal
            / (1.0 + assumptions.discount_rate).powi(assumptions.projection_years as i32);

        let enterprise_value =
            present_value_cash_flows.iter().sum::<f64>() + present_value_terminal;

        let debt = snapshot.total_debt.unwrap_or(0.0);
        let cash = snapshot.total_cash.unwrap_or(0.0);
        let equity_value = enterprise_value - debt + cash;

        // Without a usable share count the equity value itself is the
        // estimate; dividing by zero is not.
        let estimated_value = match snapshot.shares_outstanding {
            Some(shares) if shares > 0.0 => equity_value / shares,
            _ => equity_value,
        };

        Ok(ValuationOutcome {
            method: ValuationMethod::Dcf,
            estimated_value,
            confidence_interval: confidence_band(estimated_value, CONFIDENCE_RANGE),
            assumptions: ResolvedAssumptions::Dcf(assumptions),
            details: CalculationDetails::Dcf {
                free_cash_flow,
                projected_cash_flows,
                terminal_value: terminal,
                present_value_cash_flows,
                present_value_terminal,
                enterprise_value,
                equity_value,
                shares_outstanding: snapshot.shares_outstanding,
            },
        })
    }
}
