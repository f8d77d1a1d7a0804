//! x402 resource server - gates an HTTP endpoint behind 402 payment challenges.
//!
//! Requests to the premium endpoint without an `X-Payment-Authorization`
//! header receive HTTP 402 with a [`PaymentRequiredBody`](x402::PaymentRequiredBody)
//! and a `WWW-Authenticate` header; requests carrying a token accepted by the
//! configured verifier get the premium payload.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven server configuration ([`ServerConfig`](config::ServerConfig))
//! - [`middleware`] - Payment gate adapter ([`require_payment`](middleware::require_payment))
//! - [`routes`] - HTTP handlers
//! - [`metrics`] - Prometheus metrics for request and payment tracking
//! - [`stats`] - Per-instance counters behind `/api/stats`

pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod resources;
pub mod routes;
pub mod state;
pub mod stats;

pub use config::{ConfigError, ServerConfig};
pub use error::ServerError;
pub use middleware::{payment_header, payment_required_response, require_payment};
pub use state::AppState;
