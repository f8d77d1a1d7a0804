//! x402 payment-required protocol core.
//!
//! Implements the HTTP 402 challenge/response handshake used to gate a
//! resource behind payment. A request without proof of payment receives a
//! [`PaymentChallenge`]; a request carrying a token accepted by the
//! configured [`PaymentVerifier`] is granted and recorded in the
//! append-only [`PaymentLog`].
//!
//! This crate is HTTP-agnostic. The actix-web resource server lives in the
//! `x402-open-server` crate.
//!
//! # Quick example
//!
//! ```
//! use std::sync::Arc;
//! use x402::{GateDecision, PaymentConfig, PaymentGate};
//!
//! let gate = PaymentGate::demo(Arc::new(PaymentConfig::default()));
//!
//! assert!(matches!(
//!     gate.access_resource(None, "/api/premium"),
//!     GateDecision::Challenge(_)
//! ));
//! assert!(matches!(
//!     gate.access_resource(Some("sig_abc123"), "/api/premium"),
//!     GateDecision::Granted(_)
//! ));
//! assert_eq!(gate.log().len(), 1);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod log;
pub mod payment;
pub mod verifier;

// Re-exports
pub use config::{ConfigSummary, PaymentConfig};
pub use constants::*;
pub use error::X402Error;
pub use gate::{GateDecision, PaymentGate};
pub use log::PaymentLog;
pub use payment::{
    PaymentChallenge, PaymentInstructions, PaymentLogEntry, PaymentRequiredBody, PaymentTerms,
};
pub use verifier::{AcceptAnyVerifier, PaymentVerifier};
