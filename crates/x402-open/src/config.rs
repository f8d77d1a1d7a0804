use serde::Serialize;

use crate::constants::{
    DEFAULT_NETWORK, DEFAULT_RPC_URL, DEFAULT_TOKEN_MINT, DEMO_MODE_ADDRESS, NOT_CONFIGURED,
};
use crate::error::X402Error;

/// Process-wide payment configuration.
///
/// Built once at startup and shared by `Arc`; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    payment_address: Option<String>,
    token_mint: String,
    network: String,
    rpc_url: String,
}

/// Public view of a [`PaymentConfig`], as returned by `/api/payment-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub payment_address: String,
    pub token_mint: String,
    pub network: String,
    pub rpc_url: String,
}

impl Default for PaymentConfig {
    /// Demo mode on Solana devnet with USDC.
    fn default() -> Self {
        Self {
            payment_address: None,
            token_mint: DEFAULT_TOKEN_MINT.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

impl PaymentConfig {
    /// Build a configuration. An empty `payment_address` is treated as unset.
    pub fn new(
        payment_address: Option<String>,
        token_mint: impl Into<String>,
        network: impl Into<String>,
        rpc_url: impl Into<String>,
    ) -> Result<Self, X402Error> {
        let token_mint = token_mint.into();
        let network = network.into();
        if token_mint.trim().is_empty() {
            return Err(X402Error::ConfigError("token mint must not be empty".into()));
        }
        if network.trim().is_empty() {
            return Err(X402Error::ConfigError("network must not be empty".into()));
        }
        Ok(Self {
            payment_address: payment_address.filter(|a| !a.trim().is_empty()),
            token_mint,
            network,
            rpc_url: rpc_url.into(),
        })
    }

    pub fn payment_address(&self) -> Option<&str> {
        self.payment_address.as_deref()
    }

    pub fn token_mint(&self) -> &str {
        &self.token_mint
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Whether a real recipient address is configured.
    pub fn is_configured(&self) -> bool {
        self.payment_address.is_some()
    }

    /// Recipient as shown in payment challenges (`DEMO_MODE` when unset).
    pub fn challenge_address(&self) -> &str {
        self.payment_address().unwrap_or(DEMO_MODE_ADDRESS)
    }

    /// Recipient as shown in metadata responses (`NOT_CONFIGURED` when unset).
    pub fn display_address(&self) -> &str {
        self.payment_address().unwrap_or(NOT_CONFIGURED)
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            payment_address: self.display_address().to_string(),
            token_mint: self.token_mint.clone(),
            network: self.network.clone(),
            rpc_url: self.rpc_url.clone(),
        }
    }
}
