//! Recommendation and risk-factor synthesis.
//!
//! Folds the surviving outcomes of a batch into one recommendation label and
//! derives a risk-factor list from the snapshot and market backdrop.

use super::types::{
    FinancialSnapshot, MarketContext, Recommendation, ValuationOutcome,
};

// Thresholds as multiples of current price
const STRONG_BUY_RATIO: f64 = 1.20;
const BUY_RATIO: f64 = 1.05;
const SELL_RATIO: f64 = 0.80;
const SOFT_DOWNSIDE_RATIO: f64 = 0.95;

// Risk rule thresholds
const HIGH_DEBT_TO_EQUITY: f64 = 1.0;
const HIGH_PE: f64 = 30.0;
const HIGH_VOLATILITY: f64 = 0.3;

/// Entry emitted when no risk rule fires; the list is never empty.
pub const NO_RISK_SENTINEL: &str = "no significant risk factors identified";

/// Recommendation from the mean of the surviving estimates vs current price.
///
/// An empty outcome set short-circuits before any mean is computed.
pub fn recommend(outcomes: &[ValuationOutcome], current_price: f64) -> Recommendation {
    if outcomes.is_empty() {
        return Recommendation::InsufficientData;
    }

    let mean = outcomes.iter().map(|o| o.estimated_value).sum::<f64>()
        / outcomes.len() as f64;

    if mean > current_price * STRONG_BUY_RATIO {
        Recommendation::StrongBuy
    } else if mean > current_price * BUY_RATIO {
        Recommendation::Buy
    } else if mean < current_price * SELL_RATIO {
        Recommendation::Sell
    } else if mean < current_price * SOFT_DOWNSIDE_RATIO {
        Recommendation::HoldSlightDownside
    } else {
        Recommendation::HoldFairValue
    }
}

/// Rule-based risk factors, in check-declaration order.
pub fn risk_factors(snapshot: &FinancialSnapshot, context: &MarketContext) -> Vec<String> {
    let mut factors = Vec::new();

    if snapshot
        .debt_to_equity
        .is_some_and(|ratio| ratio > HIGH_DEBT_TO_EQUITY)
    {
        factors.push("High debt-to-equity ratio".to_string());
    }

    if snapshot.pe_ratio.is_some_and(|pe| pe > HIGH_PE) {
        factors.push("High P/E ratio may indicate overvaluation".to_string());
    }

    if context.market_volatility > HIGH_VOLATILITY {
        factors.push("High market volatility".to_string());
    }

    if factors.is_empty() {
        factors.push(NO_RISK_SENTINEL.to_string());
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assumptions::ComparativeAssumptions;
    use crate::engine::types::{CalculationDetails, ResolvedAssumptions, ValuationMethod};

    fn make_outcome(estimated_value: f64) -> ValuationOutcome {
        ValuationOutcome {
            method: ValuationMethod::Comparative,
            estimated_value,
            confidence_interval: (estimated_value * 0.8, estimated_value * 1.2),
            assumptions: ResolvedAssumptions::Comparative(ComparativeAssumptions {
                peer_premium: 0.10,
            }),
            details: CalculationDetails::Comparative {
                current_price: 100.0,
                peer_premium: 0.10,
            },
        }
    }

    fn make_snapshot(
        debt_to_equity: Option<f64>,
        pe_ratio: Option<f64>,
    ) -> FinancialSnapshot {
        FinancialSnapshot {
            current_price: 100.0,
            market_cap: None,
            pe_ratio,
            peg_ratio: None,
            price_to_book: None,
            debt_to_equity,
            revenue_growth: None,
            earnings_growth: None,
            free_cash_flow: None,
            eps: None,
            sector: None,
            industry: None,
            company_name: None,
            total_debt: None,
            total_cash: None,
            shares_outstanding: None,
        }
    }

    fn context_with_volatility(market_volatility: f64) -> MarketContext {
        MarketContext {
            market_volatility,
            ..MarketContext::default()
        }
    }

    #[test]
    fn test_recommendation_thresholds() {
        let price = 100.0;

        let cases = [
            (125.0, Recommendation::StrongBuy),
            (110.0, Recommendation::Buy),
            (102.0, Recommendation::HoldFairValue),
            (90.0, Recommendation::HoldSlightDownside),
            (70.0, Recommendation::Sell),
        ];

        for (mean, expected) in cases {
            let outcomes = vec![make_outcome(mean)];
            assert_eq!(
                recommend(&outcomes, price),
                expected,
                "mean estimate {mean}"
            );
        }
    }

    #[test]
    fn test_recommendation_averages_outcomes() {
        // (130 + 120) / 2 = 125 -> Strong Buy
        let outcomes = vec![make_outcome(130.0), make_outcome(120.0)];
        assert_eq!(recommend(&outcomes, 100.0), Recommendation::StrongBuy);
    }

    #[test]
    fn test_recommendation_empty_short_circuits() {
        assert_eq!(recommend(&[], 100.0), Recommendation::InsufficientData);
        // No panic even with a zero price
        assert_eq!(recommend(&[], 0.0), Recommendation::InsufficientData);
    }

    #[test]
    fn test_risk_factor_sentinel() {
        let snapshot = make_snapshot(Some(0.5), Some(12.0));
        let context = context_with_volatility(0.05);

        assert_eq!(
            risk_factors(&snapshot, &context),
            vec![NO_RISK_SENTINEL.to_string()]
        );
    }

    #[test]
    fn test_risk_factors_fire_in_declaration_order() {
        let snapshot = make_snapshot(Some(1.5), Some(35.0));
        let context = context_with_volatility(0.4);

        let factors = risk_factors(&snapshot, &context);
        assert_eq!(
            factors,
            vec![
                "High debt-to-equity ratio".to_string(),
                "High P/E ratio may indicate overvaluation".to_string(),
                "High market volatility".to_string(),
            ]
        );

        // Rules are distinct even when all fire at once
        let unique: std::collections::HashSet<_> = factors.iter().collect();
        assert_eq!(unique.len(), factors.len());
    }

    #[test]
    fn test_unknown_ratios_do_not_flag() {
        // Absent fields are unknown, not risky
        let snapshot = make_snapshot(None, None);
        let context = context_with_volatility(0.0);

        assert_eq!(
            risk_factors(&snapshot, &context),
            vec![NO_RISK_SENTINEL.to_string()]
        );
    }

    #[test]
    fn test_boundary_values_do_not_flag() {
        // Thresholds are strict: exactly-at-threshold is not flagged
        let snapshot = make_snapshot(Some(1.0), Some(30.0));
        let context = context_with_volatility(0.3);

        assert_eq!(
            risk_factors(&snapshot, &context),
            vec![NO_RISK_SENTINEL.to_string()]
        );
    }
}
