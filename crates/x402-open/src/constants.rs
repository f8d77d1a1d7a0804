/// Request header carrying the proof of payment.
pub const PAYMENT_HEADER: &str = "X-Payment-Authorization";

/// x402 version advertised in challenge bodies.
pub const X402_VERSION: u32 = 1;

/// Protocol version string reported by the stats endpoint.
pub const X402_PROTOCOL_VERSION: &str = "1.0";

/// Scheme token used in the `WWW-Authenticate` challenge header.
pub const AUTH_SCHEME: &str = "X402";

/// USDC mint on Solana (devnet and mainnet share the same address).
pub const DEFAULT_TOKEN_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Default network identifier.
pub const DEFAULT_NETWORK: &str = "solana-devnet";

/// Default RPC endpoint for the default network. Informational only.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default price of the gated resource.
pub const DEFAULT_AMOUNT: &str = "0.10";

/// Default currency code of the gated resource.
pub const DEFAULT_CURRENCY: &str = "USDC";

/// Default human-readable description placed in challenges.
pub const DEFAULT_DESCRIPTION: &str = "Premium market data access";

/// Recipient placeholder in challenges when no address is configured.
pub const DEMO_MODE_ADDRESS: &str = "DEMO_MODE";

/// Recipient placeholder in metadata responses when no address is configured.
pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";

/// Characters of the authorization token kept in a log entry.
pub const LOG_TOKEN_PREFIX_CHARS: usize = 16;

/// Characters of the authorization token written to the tracing output.
pub const TRACE_TOKEN_PREFIX_CHARS: usize = 32;

/// Number of entries returned by the payment-info endpoint.
pub const RECENT_PAYMENTS_LIMIT: usize = 10;
