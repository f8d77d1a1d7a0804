use thiserror::Error;

/// Errors returned by x402 operations.
///
/// The payment gate itself never fails: a missing payment is a challenge,
/// not an error. These variants cover the plumbing around it.
#[derive(Debug, Error)]
pub enum X402Error {
    #[error("config error: {0}")]
    ConfigError(String),
}
