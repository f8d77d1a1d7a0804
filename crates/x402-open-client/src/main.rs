use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use x402_client::{default_checks, run_check};

/// Smoke-test a running x402-open server.
#[derive(Parser, Debug)]
#[command(name = "x402-smoke")]
#[command(about = "Check that an x402-open server answers 200/200/402 on /, /health and /api/premium")]
struct CliArgs {
    /// Base URL of the server under test
    #[arg(env = "X402_SERVER_URL", default_value = "http://localhost:8402")]
    base_url: String,

    /// Also request the premium endpoint with this payment token and expect 200
    #[arg(long, env = "X402_PAYMENT_TOKEN")]
    with_payment: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = CliArgs::parse();

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("x402-open server smoke test");
    println!("Testing server at: {}", args.base_url);

    let checks = default_checks(args.with_payment.as_deref());
    let total = checks.len();
    let mut passed = 0;

    for check in &checks {
        println!("\n{}", "=".repeat(60));
        println!("{}: GET {}", check.description, check.path);
        println!("Expected status: {}", check.expected_status);
        println!("{}", "=".repeat(60));

        match run_check(&client, &args.base_url, check).await {
            Ok(outcome) => {
                if outcome.passed() {
                    println!("OK status code: {}", outcome.status);
                    passed += 1;
                } else {
                    println!(
                        "FAIL expected {}, got {}",
                        check.expected_status, outcome.status
                    );
                }
                if !outcome.payment_headers.is_empty() {
                    println!("\nResponse headers:");
                    for (name, value) in &outcome.payment_headers {
                        println!("  {name}: {value}");
                    }
                }
                println!("\nResponse body:\n{}", outcome.pretty_body());
            }
            Err(e) => println!("FAIL {e}"),
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Test Results: {passed}/{total} passed");
    println!("{}", "=".repeat(60));

    if passed == total {
        println!("All checks passed.");
        ExitCode::SUCCESS
    } else {
        println!("Some checks failed. Check your server configuration.");
        ExitCode::FAILURE
    }
}
