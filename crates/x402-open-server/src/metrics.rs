use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Request counters
pub static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new("x402_server_requests_total", "Total HTTP requests by endpoint and status"),
        &["endpoint", "status"],
    )
    .expect("valid metric definition")
});

// Payment counters
pub static CHALLENGES_ISSUED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "x402_server_challenges_total",
        "Total number of 402 challenges issued",
    )
    .expect("valid metric definition")
});

pub static PAYMENTS_ACCEPTED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "x402_server_payments_accepted_total",
        "Total number of accepted payment authorizations",
    )
    .expect("valid metric definition")
});

pub static PAYMENTS_REJECTED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "x402_server_payments_rejected_total",
        "Total number of rejected payment authorizations",
    )
    .expect("valid metric definition")
});

/// Register all metrics with the registry. Safe to call more than once.
pub fn register_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(REQUESTS_TOTAL.clone()),
        Box::new(CHALLENGES_ISSUED.clone()),
        Box::new(PAYMENTS_ACCEPTED.clone()),
        Box::new(PAYMENTS_REJECTED.clone()),
    ];
    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => tracing::warn!("Failed to register metric: {}", e),
        }
    }
}

/// Record one request against `endpoint` with its response status.
pub fn record_request(endpoint: &str, status: u16) {
    let status = status.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, status.as_str()])
        .inc();
}

/// Render the registry in the Prometheus text exposition format.
pub fn metrics_output() -> Result<String, prometheus::Error> {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
