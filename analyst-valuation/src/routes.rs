//! HTTP routes for the valuation service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use analyst_common::logging::generate_trace_id;
use analyst_common::Error;

use crate::engine::types::{
    FinancialSnapshot, MarketContext, Recommendation, ValuationMethod,
    ValuationOutcome,
};
use crate::engine::ValuationError;
use crate::ValuationState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// Valuation request. The snapshot and market context arrive already
/// resolved by the data-retrieval service; this handler performs no market
/// data I/O of its own.
#[derive(Debug, Deserialize)]
pub struct ValuationRequest {
    /// Stock symbol to analyze
    pub symbol: String,
    /// Methods to apply, in the order outcomes should be reported
    #[serde(default = "default_methods")]
    pub methods: Vec<ValuationMethod>,
    /// Caller assumption overrides, shared by all requested methods
    #[serde(default)]
    pub assumptions: Option<HashMap<String, f64>>,
    /// Resolved financial snapshot for the symbol
    pub snapshot: Option<FinancialSnapshot>,
    /// Resolved market backdrop
    #[serde(default)]
    pub market_context: Option<MarketContext>,
}

fn default_methods() -> Vec<ValuationMethod> {
    vec![
        ValuationMethod::Dcf,
        ValuationMethod::Peg,
        ValuationMethod::Pe,
    ]
}

#[derive(Debug, Serialize)]
pub struct ValuationResponse {
    pub symbol: String,
    pub current_price: f64,
    pub snapshot: FinancialSnapshot,
    pub valuations: Vec<ValuationOutcome>,
    pub recommendation: Recommendation,
    pub recommendation_note: String,
    pub risk_factors: Vec<String>,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Catalog entry for one valuation method
#[derive(Debug, Serialize)]
pub struct MethodDescriptor {
    pub method: ValuationMethod,
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: &'static str,
    pub data_requirements: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    pub methods: Vec<MethodDescriptor>,
}

fn to_http(error: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse {
        error: status
            .canonical_reason()
            .unwrap_or("error")
            .to_ascii_lowercase()
            .replace(' ', "_"),
        message: error.to_string(),
    };
    (status, Json(body))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "analyst-valuation".to_string(),
    })
}

/// Run the requested valuation methods for one stock
pub async fn perform_valuation(
    State(state): State<Arc<ValuationState>>,
    Json(request): Json<ValuationRequest>,
) -> Result<Json<ValuationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let trace_id = generate_trace_id();
    tracing::info!(
        trace_id = %trace_id,
        symbol = %request.symbol,
        methods = request.methods.len(),
        "Performing valuation"
    );

    // A request without resolved data is fatal before any method runs
    let snapshot = request.snapshot.ok_or_else(|| {
        to_http(Error::NotFound(format!(
            "no resolved financial data for stock symbol: {}",
            request.symbol
        )))
    })?;
    let context = request.market_context.unwrap_or_default();

    match state
        .engine
        .evaluate(
            &request.symbol,
            &request.methods,
            &snapshot,
            &context,
            request.assumptions.as_ref(),
        )
        .await
    {
        Ok(batch) => Ok(Json(ValuationResponse {
            symbol: batch.symbol,
            current_price: batch.current_price,
            snapshot,
            valuations: batch.outcomes,
            recommendation_note: batch.recommendation.rationale().to_string(),
            recommendation: batch.recommendation,
            risk_factors: batch.risk_factors,
            generated_at: Utc::now().to_rfc3339(),
        })),
        Err(error @ ValuationError::NoMethodsRequested) => {
            Err(to_http(Error::InvalidInput(error.to_string())))
        }
        Err(error) => {
            tracing::error!(trace_id = %trace_id, error = %error, "Valuation failed");
            Err(to_http(Error::Internal(error.to_string())))
        }
    }
}

/// Catalog of available valuation methods
pub async fn valuation_methods() -> Json<MethodsResponse> {
    let methods = ValuationMethod::ALL
        .iter()
        .map(|&method| MethodDescriptor {
            method,
            name: method.name(),
            description: method.description(),
            complexity: method.complexity(),
            data_requirements: method.data_requirements(),
        })
        .collect();

    Json(MethodsResponse { methods })
}
