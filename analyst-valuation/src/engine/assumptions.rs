//! Per-method valuation assumptions.
//!
//! Each method resolves an immutable assumption struct per call: built-in
//! defaults, optionally adjusted by service configuration, then by the
//! caller's override map. The caller's map is never mutated and is shared
//! across all methods in a batch, so a valuator applies only the keys it
//! recognizes and ignores keys that belong to another method. Keys no
//! method recognizes are rejected.

use analyst_common::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::ValuationError;

/// Assumption keys recognized anywhere in the method set.
pub const KNOWN_KEYS: &[&str] = &[
    "growth_rate",
    "discount_rate",
    "terminal_growth",
    "projection_years",
];

/// Reject override keys that no method in the closed set recognizes.
pub fn check_known(overrides: &HashMap<String, f64>) -> Result<(), ValuationError> {
    for key in overrides.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(ValuationError::InvalidAssumption {
                key: key.clone(),
                reason: "not recognized by any valuation method".into(),
            });
        }
    }
    Ok(())
}

fn finite(key: &str, value: f64) -> Result<f64, ValuationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::InvalidAssumption {
            key: key.into(),
            reason: "must be a finite number".into(),
        })
    }
}

// ============================================================================
// DCF
// ============================================================================

/// Resolved DCF assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfAssumptions {
    /// Annual free-cash-flow growth over the projection horizon
    pub growth_rate: f64,
    /// Discount rate applied to projected flows and terminal value
    pub discount_rate: f64,
    /// Perpetual growth rate beyond the horizon
    pub terminal_growth: f64,
    /// Projection horizon in years
    pub projection_years: u32,
}

impl Default for DcfAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            discount_rate: 0.10,
            terminal_growth: 0.02,
            projection_years: 5,
        }
    }
}

impl DcfAssumptions {
    /// Built-in defaults adjusted by service configuration.
    pub fn from_config(engine: Option<&EngineConfig>) -> Self {
        let mut defaults = Self::default();

        if let Some(engine) = engine {
            if let Some(rate) = engine.growth_rate {
                defaults.growth_rate = rate;
            }
            if let Some(rate) = engine.discount_rate {
                defaults.discount_rate = rate;
            }
            if let Some(rate) = engine.terminal_growth {
                defaults.terminal_growth = rate;
            }
            if let Some(years) = engine.projection_years.filter(|&y| y >= 1) {
                defaults.projection_years = years;
            }
        }

        defaults
    }

    /// Apply recognized caller overrides on top of these defaults.
    ///
    /// The caller's map is left untouched; unrecognized-but-known keys are
    /// ignored (they belong to another method), unknown keys fail.
    pub fn resolve(
        mut self,
        overrides: &HashMap<String, f64>,
    ) -> Result<Self, ValuationError> {
        check_known(overrides)?;

        if let Some(&rate) = overrides.get("growth_rate") {
            self.growth_rate = finite("growth_rate", rate)?;
        }
        if let Some(&rate) = overrides.get("discount_rate") {
            self.discount_rate = finite("discount_rate", rate)?;
        }
        if let Some(&rate) = overrides.get("terminal_growth") {
            self.terminal_growth = finite("terminal_growth", rate)?;
        }
        if let Some(&years) = overrides.get("projection_years") {
            if !years.is_finite() || years < 1.0 || years.fract() != 0.0 {
                return Err(ValuationError::InvalidAssumption {
                    key: "projection_years".into(),
                    reason: format!(
                        "must be a positive whole number of years, got {years}"
                    ),
                });
            }
            self.projection_years = years as u32;
        }

        Ok(self)
    }
}

// ============================================================================
// PEG
// ============================================================================

/// Resolved PEG assumptions. PEG defines no overridable keys; the struct
/// records the fair-value anchor and the growth rate actually used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PegAssumptions {
    /// PEG considered fair value
    pub fair_peg_ratio: f64,
    /// Earnings growth rate taken from the snapshot (decimal)
    pub growth_rate: f64,
}

impl PegAssumptions {
    pub fn new(growth_rate: f64) -> Self {
        Self {
            fair_peg_ratio: 1.0,
            growth_rate,
        }
    }
}

// ============================================================================
// P/E
// ============================================================================

/// Resolved P/E assumptions: the industry anchor the estimate is built on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeAssumptions {
    /// Industry average P/E used as the fair multiple
    pub industry_pe_ratio: f64,
}

// ============================================================================
// Comparative
// ============================================================================

/// Resolved comparative assumptions: the flat peer premium applied by the
/// placeholder strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAssumptions {
    /// Premium over current price standing in for peer multiples
    pub peer_premium: f64,
}

// ============================================================================
// Tests
// ============================================================================
