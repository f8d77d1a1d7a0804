use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;
use crate::constants::{
    AUTH_SCHEME, DEFAULT_AMOUNT, DEFAULT_CURRENCY, DEFAULT_DESCRIPTION, LOG_TOKEN_PREFIX_CHARS,
    X402_VERSION,
};

/// Fixed monetary terms of a gated resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Decimal amount, e.g. `"0.10"`.
    pub amount: String,
    /// Currency code, e.g. `"USDC"`.
    pub currency: String,
    pub description: String,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl PaymentTerms {
    /// Human-readable cost, e.g. `"$0.10 USDC"`.
    pub fn cost_label(&self) -> String {
        format!("${} {}", self.amount, self.currency)
    }
}

/// A pending payment requirement, issued fresh for every unpaid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentChallenge {
    pub amount: String,
    pub currency: String,
    pub payment_address: String,
    pub token_mint: String,
    pub network: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl PaymentChallenge {
    pub fn new(config: &PaymentConfig, terms: &PaymentTerms) -> Self {
        Self {
            amount: terms.amount.clone(),
            currency: terms.currency.clone(),
            payment_address: config.challenge_address().to_string(),
            token_mint: config.token_mint().to_string(),
            network: config.network().to_string(),
            description: terms.description.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Value of the `WWW-Authenticate` header accompanying a 402.
    pub fn www_authenticate(&self) -> String {
        format!(
            "{AUTH_SCHEME} payment_address=\"{}\" amount=\"{}\" currency=\"{}\"",
            self.payment_address, self.amount, self.currency
        )
    }

    /// Whether two challenges demand the same payment, ignoring issuance time.
    pub fn same_terms(&self, other: &PaymentChallenge) -> bool {
        self.amount == other.amount
            && self.currency == other.currency
            && self.payment_address == other.payment_address
            && self.token_mint == other.token_mint
            && self.network == other.network
    }
}

/// Step-by-step instructions shipped with every challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstructions {
    pub step_1: String,
    pub step_2: String,
    pub step_3: String,
    pub step_4: String,
}

impl Default for PaymentInstructions {
    fn default() -> Self {
        Self {
            step_1: "Create a Solana transaction with the specified amount".to_string(),
            step_2: "Send to the payment_address".to_string(),
            step_3: "Include transaction signature in X-Payment-Authorization header".to_string(),
            step_4: "Retry the request with the authorization header".to_string(),
        }
    }
}

/// The 402 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequiredBody {
    pub error: String,
    pub message: String,
    pub x402_version: u32,
    pub payment: PaymentChallenge,
    pub instructions: PaymentInstructions,
}

impl PaymentRequiredBody {
    pub fn new(challenge: PaymentChallenge, message: impl Into<String>) -> Self {
        Self {
            error: "Payment Required".to_string(),
            message: message.into(),
            x402_version: X402_VERSION,
            payment: challenge,
            instructions: PaymentInstructions::default(),
        }
    }
}

/// Record of an accepted authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLogEntry {
    pub timestamp: DateTime<Utc>,
    /// First characters of the token followed by `...`.
    pub authorization: String,
    pub endpoint: String,
}

impl PaymentLogEntry {
    pub fn new(token: &str, endpoint: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            authorization: format!("{}...", truncate_chars(token, LOG_TOKEN_PREFIX_CHARS)),
            endpoint: endpoint.into(),
        }
    }
}

/// Prefix of `s` holding at most `max` characters. Never splits a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
