//! Valuation engine types.
//!
//! Defines the request-scoped data model: the resolved financial snapshot
//! and market context consumed by the valuators, and the outcome types they
//! produce. Nothing here is mutated after construction; every valuator
//! returns a fresh outcome.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;

use super::assumptions::{
    ComparativeAssumptions, DcfAssumptions, PeAssumptions, PegAssumptions,
};

// ============================================================================
// Method Identifiers
// ============================================================================

/// Supported valuation methods.
///
/// The set is closed and enumerable; dispatch is a match, not a plugin
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationMethod {
    /// Discounted Cash Flow
    Dcf,
    /// Price/Earnings to Growth
    Peg,
    /// Price/Earnings vs industry average
    Pe,
    /// Peer-comparative placeholder
    Comparative,
}

impl ValuationMethod {
    /// All methods, in catalog order.
    pub const ALL: [ValuationMethod; 4] =
        [Self::Dcf, Self::Peg, Self::Pe, Self::Comparative];

    /// Human-readable method name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dcf => "Discounted Cash Flow",
            Self::Peg => "Price/Earnings to Growth",
            Self::Pe => "Price/Earnings",
            Self::Comparative => "Comparative Analysis",
        }
    }

    /// One-line description for the method catalog.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Dcf => "Values stock based on future cash flows discounted to present value",
            Self::Peg => "Compares P/E ratio to earnings growth rate",
            Self::Pe => "Compares stock price to earnings per share",
            Self::Comparative => "Compares to similar companies in the same industry",
        }
    }

    /// Rough complexity label for the method catalog.
    pub const fn complexity(&self) -> &'static str {
        match self {
            Self::Dcf => "High",
            Self::Peg | Self::Comparative => "Medium",
            Self::Pe => "Low",
        }
    }

    /// Inputs the method needs resolved before it can run.
    pub const fn data_requirements(&self) -> &'static [&'static str] {
        match self {
            Self::Dcf => &["Free cash flow", "Growth projections", "Discount rate"],
            Self::Peg => &["P/E ratio", "Earnings growth rate"],
            Self::Pe => &["Current price", "Earnings per share"],
            Self::Comparative => &["Peer company data", "Industry metrics"],
        }
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dcf => write!(f, "DCF"),
            Self::Peg => write!(f, "PEG"),
            Self::Pe => write!(f, "P/E"),
            Self::Comparative => write!(f, "Comparative"),
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Point-in-time financial record for one stock, resolved upstream by the
/// data-retrieval service. Absent numeric fields are unknown, never zero;
/// valuators that need them fail with a method-specific error instead of
/// computing on a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Last traded price
    pub current_price: f64,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Trailing P/E ratio
    pub pe_ratio: Option<f64>,
    /// PEG ratio as reported (recomputed by the PEG method)
    pub peg_ratio: Option<f64>,
    /// Price-to-book ratio
    pub price_to_book: Option<f64>,
    /// Debt-to-equity ratio
    pub debt_to_equity: Option<f64>,
    /// Revenue growth rate (decimal, 0.08 = 8%)
    pub revenue_growth: Option<f64>,
    /// Earnings growth rate (decimal)
    pub earnings_growth: Option<f64>,
    /// Trailing free cash flow
    pub free_cash_flow: Option<f64>,
    /// Earnings per share; derived from price/PE when absent
    pub eps: Option<f64>,
    /// Sector label for industry-average lookups
    pub sector: Option<String>,
    /// Industry label
    pub industry: Option<String>,
    /// Company display name
    pub company_name: Option<String>,
    /// Total debt
    pub total_debt: Option<f64>,
    /// Total cash
    pub total_cash: Option<f64>,
    /// Shares outstanding
    pub shares_outstanding: Option<f64>,
}

impl FinancialSnapshot {
    /// EPS as reported, or derived from price / PE when the report omits it.
    pub fn eps_or_derived(&self) -> Option<f64> {
        self.eps.or_else(|| {
            self.pe_ratio
                .filter(|pe| *pe != 0.0)
                .map(|pe| self.current_price / pe)
        })
    }
}

/// Quote for one market index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index level
    pub price: f64,
    /// Daily change (decimal, 0.01 = 1%)
    pub change_percent: Option<f64>,
    /// Realized volatility of the index
    pub volatility: Option<f64>,
}

/// Broad market backdrop for a valuation request, resolved upstream.
/// Every field is optional-friendly; valuators that don't need a field
/// must not fail on its absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Named economic indicators (rates, CPI, ...)
    #[serde(default)]
    pub economic_indicators: HashMap<String, f64>,
    /// Major index quotes keyed by index symbol
    #[serde(default)]
    pub market_indices: HashMap<String, IndexQuote>,
    /// Sector performance keyed by sector label (decimal change)
    #[serde(default)]
    pub sector_performance: HashMap<String, f64>,
    /// Aggregate volatility score derived from the index quotes
    #[serde(default)]
    pub market_volatility: f64,
}

impl MarketContext {
    /// Build a context and derive the aggregate volatility score from the
    /// index quotes.
    pub fn new(
        economic_indicators: HashMap<String, f64>,
        market_indices: HashMap<String, IndexQuote>,
        sector_performance: HashMap<String, f64>,
    ) -> Self {
        let market_volatility = aggregate_volatility(&market_indices);
        Self {
            economic_indicators,
            market_indices,
            sector_performance,
            market_volatility,
        }
    }
}

/// Mean absolute daily change across indices; 0.0 when no index reported a
/// change.
pub fn aggregate_volatility(market_indices: &HashMap<String, IndexQuote>) -> f64 {
    let changes: Vec<f64> = market_indices
        .values()
        .filter_map(|quote| quote.change_percent)
        .map(f64::abs)
        .collect();

    if changes.is_empty() {
        0.0
    } else {
        changes.mean()
    }
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Assumptions a method actually used, resolved from defaults plus any
/// recognized caller overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedAssumptions {
    Dcf(DcfAssumptions),
    Peg(PegAssumptions),
    Pe(PeAssumptions),
    Comparative(ComparativeAssumptions),
}

/// Every intermediate quantity behind an estimate, sufficient to audit how
/// it was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculationDetails {
    Dcf {
        free_cash_flow: f64,
        projected_cash_flows: Vec<f64>,
        terminal_value: f64,
        present_value_cash_flows: Vec<f64>,
        present_value_terminal: f64,
        enterprise_value: f64,
        equity_value: f64,
        shares_outstanding: Option<f64>,
    },
    Peg {
        pe_ratio: f64,
        earnings_growth: f64,
        peg_ratio: f64,
        fair_pe_ratio: f64,
        eps: f64,
    },
    Pe {
        current_pe: f64,
        industry_pe: f64,
        eps: f64,
        pe_difference: f64,
    },
    Comparative {
        current_price: f64,
        peer_premium: f64,
    },
}

/// Result of one successfully executed valuation method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationOutcome {
    /// Which method produced this outcome
    pub method: ValuationMethod,
    /// Estimated per-share value. Not clamped: high debt and low cash can
    /// legitimately produce a negative equity value.
    pub estimated_value: f64,
    /// Heuristic `(lower, upper)` band around the estimate, `lower <= upper`
    pub confidence_interval: (f64, f64),
    /// Assumptions actually used
    pub assumptions: ResolvedAssumptions,
    /// Audit trail of intermediate quantities
    pub details: CalculationDetails,
}

/// Aggregate of all successful outcomes for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationBatchResult {
    /// Stock symbol the batch was run for
    pub symbol: String,
    /// Price the estimates are compared against
    pub current_price: f64,
    /// Successful outcomes, in requested-method order
    pub outcomes: Vec<ValuationOutcome>,
    /// Aggregated recommendation
    pub recommendation: Recommendation,
    /// Risk factors; never empty (sentinel entry when no rule fires)
    pub risk_factors: Vec<String>,
}

// ============================================================================
// Recommendation
// ============================================================================

/// Recommendation label from comparing the mean estimate to current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold (fair value)")]
    HoldFairValue,
    #[serde(rename = "Hold (slight downside)")]
    HoldSlightDownside,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Insufficient data for recommendation")]
    InsufficientData,
}

impl Recommendation {
    /// Longer rationale for presentation layers.
    pub const fn rationale(&self) -> &'static str {
        match self {
            Self::StrongBuy => {
                "Multiple valuation methods suggest significant upside"
            }
            Self::Buy => "Valuation suggests moderate upside potential",
            Self::HoldFairValue => "Valuation is approximately fair value",
            Self::HoldSlightDownside => "Valuation suggests slight downside risk",
            Self::Sell => "Valuation suggests significant downside risk",
            Self::InsufficientData => {
                "No valuation method produced a usable estimate"
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "Strong Buy"),
            Self::Buy => write!(f, "Buy"),
            Self::HoldFairValue => write!(f, "Hold (fair value)"),
            Self::HoldSlightDownside => write!(f, "Hold (slight downside)"),
            Self::Sell => write!(f, "Sell"),
            Self::InsufficientData => write!(f, "Insufficient data for recommendation"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
