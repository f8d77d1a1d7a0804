//! Proof-of-payment verification.
//!
//! The gate delegates the accept/reject decision for a presented token to a
//! [`PaymentVerifier`]. The shipped [`AcceptAnyVerifier`] performs no checks
//! at all; it exists so that a real ledger-backed verifier can be swapped in
//! without touching the gate.

/// Decides whether a presented authorization token proves payment.
pub trait PaymentVerifier: Send + Sync {
    /// Return `true` if `token` is an acceptable proof of payment.
    /// The gate only calls this with non-empty tokens.
    fn verify(&self, token: &str) -> bool;

    /// Short identifier for logs and metadata.
    fn name(&self) -> &'static str;
}

/// Demo verifier: every non-empty token is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAnyVerifier;

impl PaymentVerifier for AcceptAnyVerifier {
    fn verify(&self, token: &str) -> bool {
        !token.is_empty()
    }

    fn name(&self) -> &'static str {
        "accept-any"
    }
}
