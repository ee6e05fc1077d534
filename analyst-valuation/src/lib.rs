//! Analyst Valuation Library
//!
//! This library provides automated stock valuation using four independent
//! methods (DCF, PEG, P/E, peer-comparative), with per-method failure
//! isolation and a synthesized recommendation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  analyst-valuation (Rust Service)                   │
//! │                            :4460                                    │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐     │
//! │  │  Request        │  │  Valuation      │  │  Recommendation │     │
//! │  │  Handler        │  │  Engine         │  │  Synthesis      │     │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Method isolation
//! - Each requested method runs independently against the same snapshot
//! - A failing method is logged and dropped; the batch never aborts
//! - Outcome order mirrors the requested order, failures skipped in place
//!
//! ## Resolved inputs
//! - The engine performs no I/O: the data-retrieval service resolves the
//!   financial snapshot and market context before a request reaches it
//! - Everything is created and consumed within one request; nothing
//!   persists or is mutated after construction

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod engine;
pub mod export;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use analyst_common::config::Config;
use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::engine::ValuationEngine;

/// Total budget for one valuation request, including all methods.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Inline snapshots are small; anything larger is a malformed request.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Valuation service state
pub struct ValuationState {
    /// Configuration
    pub config: Config,
    /// Valuation engine
    pub engine: ValuationEngine,
}

impl ValuationState {
    /// Create a new valuation state
    pub fn new(config: Config) -> Self {
        let engine = ValuationEngine::new(&config);
        Self { config, engine }
    }
}

/// Build the HTTP router for the valuation service.
pub fn router(state: Arc<ValuationState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/valuation", post(routes::perform_valuation))
        .route("/api/v1/valuation/methods", get(routes::valuation_methods))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Main valuation service
pub struct ValuationService {
    state: Arc<ValuationState>,
}

impl ValuationService {
    /// Create a new valuation service
    pub fn new(config: Config) -> Self {
        let state = Arc::new(ValuationState::new(config));
        Self { state }
    }

    /// Start the valuation service
    pub async fn start(self) -> Result<()> {
        let host = self.state.config.service.host.clone();
        let port = self.state.config.service.port;

        let app = router(self.state);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
