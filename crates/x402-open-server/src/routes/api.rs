use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use x402::{RECENT_PAYMENTS_LIMIT, X402_PROTOCOL_VERSION};

use crate::metrics;
use crate::middleware::require_payment;
use crate::resources;
use crate::state::AppState;

pub const FREE_ENDPOINT: &str = "/api/free";
pub const PREMIUM_ENDPOINT: &str = "/api/premium";
pub const PAYMENT_INFO_ENDPOINT: &str = "/api/payment-info";
pub const STATS_ENDPOINT: &str = "/api/stats";

/// GET /api/free - No payment required
pub async fn free(state: web::Data<AppState>) -> HttpResponse {
    state.stats.record_free();
    metrics::record_request(FREE_ENDPOINT, 200);
    HttpResponse::Ok().json(serde_json::json!({
        "message": "This is free data",
        "timestamp": Utc::now(),
        "data": resources::free_data(),
    }))
}

/// GET /api/premium - Requires an `X-Payment-Authorization` header
pub async fn premium(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    state.stats.record_premium();
    if let Err(challenge) = require_payment(&req, &state, PREMIUM_ENDPOINT) {
        return challenge;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Premium data access granted",
        "timestamp": Utc::now(),
        "payment_verified": true,
        "data": state.premium_data.as_ref(),
        "cost": state.gate.terms().cost_label(),
    }))
}

/// GET /api/payment-info - Configuration and the most recent accepted payments
pub async fn payment_info(state: web::Data<AppState>) -> HttpResponse {
    metrics::record_request(PAYMENT_INFO_ENDPOINT, 200);
    let log = state.gate.log();
    HttpResponse::Ok().json(serde_json::json!({
        "configuration": state.config.payment.summary(),
        "recent_payments": log.recent(RECENT_PAYMENTS_LIMIT),
        "total_payments": log.len(),
    }))
}

/// GET /api/stats - Request and endpoint counters
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    metrics::record_request(STATS_ENDPOINT, 200);
    let snap = state.stats.snapshot();
    HttpResponse::Ok().json(serde_json::json!({
        "uptime": "running",
        "uptime_seconds": snap.uptime_seconds,
        "total_payment_requests": state.gate.log().len(),
        "challenges_issued": snap.challenges_issued,
        "payments_accepted": snap.payments_accepted,
        "payments_rejected": snap.payments_rejected,
        "endpoints": {
            "free": 1,
            "premium": 1,
            "total": 2,
        },
        "requests": {
            "free": snap.free_requests,
            "premium": snap.premium_requests,
        },
        "x402_protocol_version": X402_PROTOCOL_VERSION,
        "implementation": "x402-open",
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(FREE_ENDPOINT, web::get().to(free))
        .route(PREMIUM_ENDPOINT, web::get().to(premium))
        .route(PAYMENT_INFO_ENDPOINT, web::get().to(payment_info))
        .route(STATS_ENDPOINT, web::get().to(stats));
}
