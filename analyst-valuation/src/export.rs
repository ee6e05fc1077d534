//! Tabular export shapes for BI reporting.
//!
//! The reporting pipeline consumes flat rows, not the nested batch result;
//! this module owns that flattening. Pushing the rows anywhere is the
//! pipeline's job, not this service's.

use serde::Serialize;

use crate::engine::types::{ValuationBatchResult, ValuationMethod};

/// One report row per successful valuation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationRow {
    pub symbol: String,
    pub method: ValuationMethod,
    pub estimated_value: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
}

/// Flatten a batch result into report rows, preserving outcome order.
pub fn batch_to_rows(batch: &ValuationBatchResult) -> Vec<ValuationRow> {
    batch
        .outcomes
        .iter()
        .map(|outcome| ValuationRow {
            symbol: batch.symbol.clone(),
            method: outcome.method,
            estimated_value: outcome.estimated_value,
            confidence_lower: outcome.confidence_interval.0,
            confidence_upper: outcome.confidence_interval.1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assumptions::ComparativeAssumptions;
    use crate::engine::types::{
        CalculationDetails, Recommendation, ResolvedAssumptions, ValuationOutcome,
    };

    fn make_outcome(method: ValuationMethod, estimated_value: f64) -> ValuationOutcome {
        ValuationOutcome {
            method,
            estimated_value,
            confidence_interval: (estimated_value * 0.9, estimated_value * 1.1),
            assumptions: ResolvedAssumptions::Comparative(ComparativeAssumptions {
                peer_premium: 0.10,
            }),
            details: CalculationDetails::Comparative {
                current_price: 100.0,
                peer_premium: 0.10,
            },
        }
    }

    #[test]
    fn test_batch_to_rows_preserves_order() {
        let batch = ValuationBatchResult {
            symbol: "AAPL".to_string(),
            current_price: 100.0,
            outcomes: vec![
                make_outcome(ValuationMethod::Pe, 110.0),
                make_outcome(ValuationMethod::Dcf, 95.0),
            ],
            recommendation: Recommendation::HoldFairValue,
            risk_factors: vec!["no significant risk factors identified".to_string()],
        };

        let rows = batch_to_rows(&batch);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].method, ValuationMethod::Pe);
        assert_eq!(rows[1].method, ValuationMethod::Dcf);
        assert_eq!(rows[0].symbol, "AAPL");
        assert!((rows[1].confidence_lower - 85.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch_yields_no_rows() {
        let batch = ValuationBatchResult {
            symbol: "EMPTY".to_string(),
            current_price: 10.0,
            outcomes: vec![],
            recommendation: Recommendation::InsufficientData,
            risk_factors: vec!["no significant risk factors identified".to_string()],
        };

        assert!(batch_to_rows(&batch).is_empty());
    }

    #[test]
    fn test_row_serializes_with_method_id() {
        let row = ValuationRow {
            symbol: "AAPL".to_string(),
            method: ValuationMethod::Dcf,
            estimated_value: 120.0,
            confidence_lower: 96.0,
            confidence_upper: 144.0,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["method"], "dcf");
        assert_eq!(json["estimated_value"], 120.0);
    }
}
