//! The payment gate: decides between challenging and granting a request.

use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::constants::TRACE_TOKEN_PREFIX_CHARS;
use crate::log::PaymentLog;
use crate::payment::{truncate_chars, PaymentChallenge, PaymentLogEntry, PaymentTerms};
use crate::verifier::{AcceptAnyVerifier, PaymentVerifier};

/// Outcome of [`PaymentGate::access_resource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No token (or an empty one) was presented.
    Challenge(PaymentChallenge),
    /// A token was presented but the verifier refused it.
    Rejected(PaymentChallenge),
    /// The token was accepted and recorded.
    Granted(PaymentLogEntry),
}

impl GateDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, GateDecision::Granted(_))
    }
}

/// Gates a resource behind payment.
///
/// Each call is evaluated on its own; the only state carried across requests
/// is the append-only [`PaymentLog`].
pub struct PaymentGate {
    config: Arc<PaymentConfig>,
    terms: PaymentTerms,
    verifier: Arc<dyn PaymentVerifier>,
    log: PaymentLog,
}

impl std::fmt::Debug for PaymentGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGate")
            .field("config", &self.config)
            .field("terms", &self.terms)
            .field("verifier", &self.verifier.name())
            .field("log_len", &self.log.len())
            .finish()
    }
}

impl PaymentGate {
    pub fn new(
        config: Arc<PaymentConfig>,
        terms: PaymentTerms,
        verifier: Arc<dyn PaymentVerifier>,
    ) -> Self {
        Self {
            config,
            terms,
            verifier,
            log: PaymentLog::new(),
        }
    }

    /// Gate with default terms and the accept-any verifier.
    pub fn demo(config: Arc<PaymentConfig>) -> Self {
        Self::new(config, PaymentTerms::default(), Arc::new(AcceptAnyVerifier))
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    pub fn terms(&self) -> &PaymentTerms {
        &self.terms
    }

    pub fn verifier_name(&self) -> &'static str {
        self.verifier.name()
    }

    pub fn log(&self) -> &PaymentLog {
        &self.log
    }

    /// A fresh challenge carrying the current terms.
    pub fn challenge(&self) -> PaymentChallenge {
        PaymentChallenge::new(&self.config, &self.terms)
    }

    /// Evaluate a request for `endpoint` carrying the optional `token`.
    ///
    /// Only a granted request touches shared state (one log append).
    pub fn access_resource(&self, token: Option<&str>, endpoint: &str) -> GateDecision {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => {
                let challenge = self.challenge();
                tracing::info!(
                    endpoint,
                    amount = %challenge.amount,
                    currency = %challenge.currency,
                    network = %challenge.network,
                    "payment required"
                );
                return GateDecision::Challenge(challenge);
            }
        };

        if !self.verifier.verify(token) {
            tracing::warn!(
                endpoint,
                verifier = self.verifier.name(),
                token = %truncate_chars(token, TRACE_TOKEN_PREFIX_CHARS),
                "payment rejected"
            );
            return GateDecision::Rejected(self.challenge());
        }

        tracing::info!(
            endpoint,
            "Payment received: {}...",
            truncate_chars(token, TRACE_TOKEN_PREFIX_CHARS)
        );
        let entry = PaymentLogEntry::new(token, endpoint);
        self.log.append(entry.clone());
        GateDecision::Granted(entry)
    }
}
