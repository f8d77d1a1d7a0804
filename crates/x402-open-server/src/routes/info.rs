use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::metrics;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "X402-Open Server";

/// GET / - Service metadata
pub async fn root(state: web::Data<AppState>) -> HttpResponse {
    metrics::record_request("/", 200);
    let payment = &state.config.payment;
    HttpResponse::Ok().json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "mode": if payment.is_configured() { "live" } else { "demo" },
        "endpoints": {
            "info": "/",
            "health": "/health",
            "free_data": "/api/free",
            "premium_data": "/api/premium",
            "payment_info": "/api/payment-info",
            "stats": "/api/stats",
            "metrics": "/metrics",
        },
        "x402_config": {
            "network": payment.network(),
            "payment_address": payment.display_address(),
            "token": state.gate.terms().currency,
            "token_mint": payment.token_mint(),
            "verifier": state.gate.verifier_name(),
        }
    }))
}

/// GET /health - Health check endpoint
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    metrics::record_request("/health", 200);
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "x402_enabled": state.config.payment.is_configured(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
