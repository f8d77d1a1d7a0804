use std::env;
use std::net::IpAddr;

use url::Url;
use x402::{PaymentConfig, DEFAULT_NETWORK, DEFAULT_RPC_URL, DEFAULT_TOKEN_MINT};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8402;
const DEFAULT_RATE_LIMIT_RPM: u64 = 600;

#[derive(Clone)]
pub struct ServerConfig {
    /// Payment terms source shared with the gate
    pub payment: PaymentConfig,
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// CORS allowed origins (`*` = any)
    pub allowed_origins: Vec<String>,
    /// Rate limit requests per minute, per client IP
    pub rate_limit_rpm: u64,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("payment", &self.payment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            payment: PaymentConfig::default(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            allowed_origins: vec!["*".to_string()],
            rate_limit_rpm: DEFAULT_RATE_LIMIT_RPM,
            metrics_token: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Optional: payment recipient. Missing means demo mode, never an error.
        let payment_address = lookup("X402_PAYMENT_ADDRESS").filter(|s| !s.trim().is_empty());
        if payment_address.is_none() {
            tracing::warn!(
                "X402_PAYMENT_ADDRESS not set. Payment verification will be mocked (demo mode)."
            );
        }

        let token_mint = lookup("X402_TOKEN_MINT").unwrap_or_else(|| DEFAULT_TOKEN_MINT.into());
        let network = lookup("X402_NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.into());

        let rpc_url = lookup("X402_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.into());
        Url::parse(&rpc_url).map_err(|_| ConfigError::InvalidUrl(rpc_url.clone()))?;

        let payment = PaymentConfig::new(payment_address, token_mint, network, rpc_url)
            .map_err(|e| ConfigError::InvalidPayment(e.to_string()))?;

        let host_str = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let host: IpAddr = host_str
            .parse()
            .map_err(|_| ConfigError::InvalidHost(host_str))?;

        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins: Vec<String> = lookup("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        let rate_limit_rpm = match lookup("RATE_LIMIT_RPM") {
            Some(r) => match r.parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidNumber("RATE_LIMIT_RPM", r)),
            },
            None => DEFAULT_RATE_LIMIT_RPM,
        };

        let metrics_token = lookup("METRICS_TOKEN").filter(|s| !s.is_empty());
        if metrics_token.is_none() {
            tracing::debug!("METRICS_TOKEN not set - /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            payment,
            host,
            port,
            allowed_origins,
            rate_limit_rpm,
            metrics_token,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid host address: {0}")]
    InvalidHost(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid value for {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("invalid payment configuration: {0}")]
    InvalidPayment(String),
}
