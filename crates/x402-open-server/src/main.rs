use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use x402_server::{config::ServerConfig, metrics::register_metrics, routes, state::AppState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let host = config.host;
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Starting X402-Open server on {}:{}", host, port);
    tracing::info!(
        "Payment address: {}",
        config
            .payment
            .payment_address()
            .unwrap_or("NOT_CONFIGURED (DEMO MODE)")
    );
    tracing::info!("Network: {}", config.payment.network());
    tracing::info!("Rate limit: {} req/min per IP", rate_limit_rpm);

    // Register Prometheus metrics
    register_metrics();

    // Create shared state
    let state = AppState::new(config);
    tracing::info!("Payment verifier: {}", state.gate.verifier_name());
    let state_data = web::Data::new(state);

    // Configure rate limiter
    let governor_conf = match GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
    {
        Some(conf) => conf,
        None => {
            tracing::error!("Failed to create rate limiter config");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(Logger::default())
            .wrap(x402_server::cors::build_cors(&allowed_origins))
            .wrap(Governor::new(&governor_conf))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
