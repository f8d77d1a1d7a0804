//! Smoke-test client for a running x402-open server.
//!
//! Issues a fixed list of GET requests and compares each response status
//! against the expected one: `/` and `/health` must answer 200, the premium
//! endpoint must answer 402 without payment and, optionally, 200 with a
//! payment authorization token.

use reqwest::header::HeaderMap;
use x402::PAYMENT_HEADER;

/// Errors that prevent a check from producing a status code at all.
#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("connection failed - is the server running? ({0})")]
    Connection(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// One request/expectation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeCheck {
    pub path: String,
    pub expected_status: u16,
    pub description: String,
    /// Value sent in the payment header, if any.
    pub payment_token: Option<String>,
}

impl SmokeCheck {
    pub fn new(path: &str, expected_status: u16, description: &str) -> Self {
        Self {
            path: path.to_string(),
            expected_status,
            description: description.to_string(),
            payment_token: None,
        }
    }

    pub fn with_payment(mut self, token: &str) -> Self {
        self.payment_token = Some(token.to_string());
        self
    }
}

/// Result of running a [`SmokeCheck`].
#[derive(Debug)]
pub struct CheckOutcome {
    pub check: SmokeCheck,
    pub status: u16,
    /// Response headers whose name mentions payment or starts with `x-`,
    /// plus `www-authenticate`.
    pub payment_headers: Vec<(String, String)>,
    pub body: String,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.status == self.check.expected_status
    }

    /// Body pretty-printed when it is JSON, raw otherwise.
    pub fn pretty_body(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

/// The default acceptance checks.
pub fn default_checks(payment_token: Option<&str>) -> Vec<SmokeCheck> {
    let mut checks = vec![
        SmokeCheck::new("/", 200, "Root endpoint"),
        SmokeCheck::new("/health", 200, "Health check"),
        SmokeCheck::new(
            "/api/premium",
            402,
            "Premium endpoint (should require payment)",
        ),
    ];
    if let Some(token) = payment_token {
        checks.push(
            SmokeCheck::new(
                "/api/premium",
                200,
                "Premium endpoint with payment authorization",
            )
            .with_payment(token),
        );
    }
    checks
}

fn interesting_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter(|(name, _)| {
            let name = name.as_str();
            name.contains("payment") || name.starts_with("x-") || name == "www-authenticate"
        })
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<non-ascii>").to_string(),
            )
        })
        .collect()
}

/// Run one check against `base_url`.
pub async fn run_check(
    client: &reqwest::Client,
    base_url: &str,
    check: &SmokeCheck,
) -> Result<CheckOutcome, SmokeError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), check.path);
    let mut request = client.get(&url);
    if let Some(ref token) = check.payment_token {
        request = request.header(PAYMENT_HEADER, token);
    }

    let resp = request.send().await.map_err(|e| {
        if e.is_connect() {
            SmokeError::Connection(e)
        } else {
            SmokeError::Request(e)
        }
    })?;

    let status = resp.status().as_u16();
    let payment_headers = interesting_headers(resp.headers());
    let body = resp.text().await?;

    tracing::debug!(url = %url, status, "smoke check finished");

    Ok(CheckOutcome {
        check: check.clone(),
        status,
        payment_headers,
        body,
    })
}
