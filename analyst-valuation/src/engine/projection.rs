//! Numeric projection primitives.
//!
//! Pure functions shared by the valuation methods: cash-flow projection,
//! Gordon Growth terminal value, and present-value discounting. No side
//! effects, no I/O.

use super::error::ValuationError;

/// Project `years` successive cash flows from an initial flow.
///
/// Element *i* (1-indexed) is `initial * (1 + growth_rate)^i`.
pub fn project_cash_flows(initial: f64, growth_rate: f64, years: u32) -> Vec<f64> {
    (1..=years)
        .map(|year| initial * (1.0 + growth_rate).powi(year as i32))
        .collect()
}

/// Terminal value via the Gordon Growth Model.
///
/// Fails with [`ValuationError::DivergentGrowth`] when
/// `discount_rate <= terminal_growth`; the division would be non-positive
/// or undefined. Callers validate this precondition before projecting.
pub fn terminal_value(
    final_period_flow: f64,
    terminal_growth: f64,
    discount_rate: f64,
) -> Result<f64, ValuationError> {
    if discount_rate <= terminal_growth {
        return Err(ValuationError::DivergentGrowth {
            discount_rate,
            terminal_growth,
        });
    }

    Ok(final_period_flow * (1.0 + terminal_growth) / (discount_rate - terminal_growth))
}

/// Discount a flow series to present value.
///
/// Element *i* (0-indexed) is `flows[i] / (1 + discount_rate)^(i+1)`.
pub fn discount_series(flows: &[f64], discount_rate: f64) -> Vec<f64> {
    flows
        .iter()
        .enumerate()
        .map(|(i, flow)| flow / (1.0 + discount_rate).powi(i as i32 + 1))
        .collect()
}
