//! Per-process request counters behind `/api/stats`.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters kept alongside the Prometheus registry, scoped to one server
/// instance so that each [`AppState`](crate::state::AppState) reports its own.
#[derive(Debug)]
pub struct RequestStats {
    started_at: Instant,
    free_requests: AtomicU64,
    premium_requests: AtomicU64,
    challenges_issued: AtomicU64,
    payments_accepted: AtomicU64,
    payments_rejected: AtomicU64,
}

/// Point-in-time copy of [`RequestStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub uptime_seconds: u64,
    pub free_requests: u64,
    pub premium_requests: u64,
    pub challenges_issued: u64,
    pub payments_accepted: u64,
    pub payments_rejected: u64,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
            free_requests: AtomicU64::new(0),
            premium_requests: AtomicU64::new(0),
            challenges_issued: AtomicU64::new(0),
            payments_accepted: AtomicU64::new(0),
            payments_rejected: AtomicU64::new(0),
        }
    }
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_free(&self) {
        self.free_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_premium(&self) {
        self.premium_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_challenge(&self) {
        self.challenges_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self) {
        self.payments_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.payments_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            uptime_seconds: self.started_at.elapsed().as_secs(),
            free_requests: self.free_requests.load(Ordering::Relaxed),
            premium_requests: self.premium_requests.load(Ordering::Relaxed),
            challenges_issued: self.challenges_issued.load(Ordering::Relaxed),
            payments_accepted: self.payments_accepted.load(Ordering::Relaxed),
            payments_rejected: self.payments_rejected.load(Ordering::Relaxed),
        }
    }
}
