use std::sync::Arc;

use actix_web::http::header::HeaderValue;
use actix_web::{test, web, App};
use x402::{PaymentConfig, PaymentTerms, PaymentVerifier};

use x402_server::config::ServerConfig;
use x402_server::routes;
use x402_server::state::AppState;

const RECIPIENT: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

fn configured() -> ServerConfig {
    ServerConfig {
        payment: PaymentConfig::new(
            Some(RECIPIENT.to_string()),
            x402::DEFAULT_TOKEN_MINT,
            "solana-devnet",
            "https://api.devnet.solana.com",
        )
        .unwrap(),
        ..ServerConfig::default()
    }
}

struct RejectAll;

impl PaymentVerifier for RejectAll {
    fn verify(&self, _token: &str) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "reject-all"
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_premium_without_header_returns_402_challenge() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get().uri("/api/premium").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 402);
    let www = resp
        .headers()
        .get("www-authenticate")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        www,
        format!(r#"X402 payment_address="{RECIPIENT}" amount="0.10" currency="USDC""#)
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Payment Required");
    assert_eq!(body["payment"]["amount"], "0.10");
    assert_eq!(body["payment"]["currency"], "USDC");
    assert_eq!(body["payment"]["payment_address"], RECIPIENT);
    assert_eq!(body["payment"]["network"], "solana-devnet");
    assert_eq!(body["payment"]["token_mint"], x402::DEFAULT_TOKEN_MINT);
    assert!(body["instructions"]["step_1"].is_string());
    assert_eq!(state.gate.log().len(), 0);
}

#[actix_rt::test]
async fn test_demo_mode_challenge_uses_placeholder_address() {
    let app = app!(AppState::new(ServerConfig::default()));

    let req = test::TestRequest::get().uri("/api/premium").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 402);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["payment"]["payment_address"], "DEMO_MODE");
}

#[actix_rt::test]
async fn test_premium_with_header_grants_access_and_logs() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/premium")
        .insert_header(("X-Payment-Authorization", "sig_abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["payment_verified"], true);
    assert_eq!(body["message"], "Premium data access granted");
    assert_eq!(body["cost"], "$0.10 USDC");
    assert!(body["data"]["market_insight"].is_string());

    let log = state.gate.log().snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].endpoint, "/api/premium");
    assert_eq!(log[0].authorization, "sig_abc123...");
}

#[actix_rt::test]
async fn test_header_name_is_case_insensitive() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/premium")
        .insert_header(("x-payment-authorization", "sig_lowercase"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(state.gate.log().len(), 1);
}

#[actix_rt::test]
async fn test_empty_header_is_treated_as_absent() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/premium")
        .insert_header(("X-Payment-Authorization", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 402);
    assert_eq!(state.gate.log().len(), 0);
}

#[actix_rt::test]
async fn test_repeated_challenges_do_not_mutate_log() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/api/premium").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 402);
        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push(body);
    }

    for body in &bodies[1..] {
        assert_eq!(body["payment"]["amount"], bodies[0]["payment"]["amount"]);
        assert_eq!(
            body["payment"]["payment_address"],
            bodies[0]["payment"]["payment_address"]
        );
    }
    assert!(state.gate.log().is_empty());
}

#[actix_rt::test]
async fn test_payment_info_caps_recent_payments_at_ten() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    for i in 0..15 {
        let req = test::TestRequest::get()
            .uri("/api/premium")
            .insert_header(("X-Payment-Authorization", format!("sig_{i}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    let req = test::TestRequest::get()
        .uri("/api/payment-info")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total_payments"], 15);
    let recent = body["recent_payments"].as_array().unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0]["authorization"], "sig_5...");
    assert_eq!(recent[9]["authorization"], "sig_14...");
    assert_eq!(body["configuration"]["payment_address"], RECIPIENT);
    assert_eq!(
        body["configuration"]["rpc_url"],
        "https://api.devnet.solana.com"
    );
}

#[actix_rt::test]
async fn test_concurrent_authorized_requests_are_all_logged() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let requests = (0..32).map(|i| {
        let req = test::TestRequest::get()
            .uri("/api/premium")
            .insert_header(("X-Payment-Authorization", format!("c{i}")))
            .to_request();
        test::call_service(&app, req)
    });
    let responses = futures::future::join_all(requests).await;

    assert!(responses.iter().all(|r| r.status() == 200));
    let log = state.gate.log().snapshot();
    assert_eq!(log.len(), 32);
    let mut tokens: Vec<_> = log.iter().map(|e| e.authorization.clone()).collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 32);
}

#[actix_rt::test]
async fn test_non_ascii_token_is_accepted() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/premium")
        .insert_header((
            "X-Payment-Authorization",
            HeaderValue::from_bytes("sig_é".as_bytes()).unwrap(),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let log = state.gate.log().snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].authorization, "sig_é...");
}

#[actix_rt::test]
async fn test_rejecting_verifier_returns_402_without_logging() {
    let state = AppState::with_verifier(configured(), PaymentTerms::default(), Arc::new(RejectAll));
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/premium")
        .insert_header(("X-Payment-Authorization", "sig_abc123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 402);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Payment authorization was not accepted");
    assert!(state.gate.log().is_empty());
    assert_eq!(state.stats.snapshot().payments_rejected, 1);
}

#[actix_rt::test]
async fn test_root_reports_configuration() {
    let app = app!(AppState::new(configured()));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "operational");
    assert_eq!(body["mode"], "live");
    assert_eq!(body["x402_config"]["network"], "solana-devnet");
    assert_eq!(body["x402_config"]["payment_address"], RECIPIENT);
    assert_eq!(body["endpoints"]["premium_data"], "/api/premium");
}

#[actix_rt::test]
async fn test_root_labels_demo_mode() {
    let app = app!(AppState::new(ServerConfig::default()));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["mode"], "demo");
    assert_eq!(body["x402_config"]["payment_address"], "NOT_CONFIGURED");
}

#[actix_rt::test]
async fn test_health_reports_x402_enabled() {
    let app = app!(AppState::new(configured()));
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["x402_enabled"], true);
    assert!(body["timestamp"].is_string());

    let app = app!(AppState::new(ServerConfig::default()));
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["x402_enabled"], false);
}

#[actix_rt::test]
async fn test_free_endpoint_needs_no_payment() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let req = test::TestRequest::get().uri("/api/free").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This is free data");
    assert_eq!(body["data"]["cost"], "Free");
    assert!(state.gate.log().is_empty());
}

#[actix_rt::test]
async fn test_stats_counts_requests_and_payments() {
    let state = AppState::new(configured());
    let app = app!(state.clone());

    let calls = [
        test::TestRequest::get().uri("/api/free").to_request(),
        test::TestRequest::get().uri("/api/premium").to_request(),
        test::TestRequest::get()
            .uri("/api/premium")
            .insert_header(("X-Payment-Authorization", "sig_abc123"))
            .to_request(),
    ];
    for req in calls {
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total_payment_requests"], 1);
    assert_eq!(body["challenges_issued"], 1);
    assert_eq!(body["payments_accepted"], 1);
    assert_eq!(body["requests"]["free"], 1);
    assert_eq!(body["requests"]["premium"], 2);
    assert_eq!(body["endpoints"]["total"], 2);
    assert_eq!(body["x402_protocol_version"], "1.0");
}

#[actix_rt::test]
async fn test_metrics_requires_token_when_configured() {
    x402_server::metrics::register_metrics();
    let config = ServerConfig {
        metrics_token: Some("metrics-secret".to_string()),
        ..configured()
    };
    let app = app!(AppState::new(config));

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer metrics-secret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("x402_server_requests_total"));
    assert!(text.contains(r#"endpoint="/metrics",status="401""#));
}

#[actix_rt::test]
async fn test_info_routes_are_counted_in_metrics() {
    x402_server::metrics::register_metrics();
    let app = app!(AppState::new(configured()));

    for uri in ["/", "/health", "/api/payment-info", "/api/stats"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await;
    }

    let output = x402_server::metrics::metrics_output().unwrap();
    for endpoint in ["/", "/health", "/api/payment-info", "/api/stats"] {
        assert!(
            output.contains(&format!(r#"endpoint="{endpoint}",status="200""#)),
            "missing {endpoint} in metrics output"
        );
    }
}
