use std::sync::Arc;

use x402::{PaymentGate, PaymentTerms, PaymentVerifier};

use crate::config::ServerConfig;
use crate::resources;
use crate::stats::RequestStats;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub gate: Arc<PaymentGate>,
    pub stats: Arc<RequestStats>,
    /// Payload behind the premium endpoint
    pub premium_data: Arc<serde_json::Value>,
}

impl AppState {
    /// State with the default terms, premium payload and accept-any verifier.
    pub fn new(config: ServerConfig) -> Self {
        let gate = PaymentGate::demo(Arc::new(config.payment.clone()));
        Self::with_gate(config, gate, resources::premium_market_data())
    }

    /// State with an explicit verifier and terms.
    pub fn with_verifier(
        config: ServerConfig,
        terms: PaymentTerms,
        verifier: Arc<dyn PaymentVerifier>,
    ) -> Self {
        let gate = PaymentGate::new(Arc::new(config.payment.clone()), terms, verifier);
        Self::with_gate(config, gate, resources::premium_market_data())
    }

    pub fn with_gate(
        config: ServerConfig,
        gate: PaymentGate,
        premium_data: serde_json::Value,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gate: Arc::new(gate),
            stats: Arc::new(RequestStats::new()),
            premium_data: Arc::new(premium_data),
        }
    }
}
