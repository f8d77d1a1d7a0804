use std::borrow::Cow;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use x402::{GateDecision, PaymentChallenge, PaymentLogEntry, PaymentRequiredBody, PAYMENT_HEADER};

use crate::metrics::{self, CHALLENGES_ISSUED, PAYMENTS_ACCEPTED, PAYMENTS_REJECTED};
use crate::state::AppState;

/// Read the payment authorization header. Header names are matched
/// case-insensitively. Values are decoded lossily, so opaque bytes outside
/// visible ASCII still count as a token.
pub fn payment_header(req: &HttpRequest) -> Option<Cow<'_, str>> {
    req.headers()
        .get(PAYMENT_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}

/// Build the 402 Payment Required response for a challenge.
pub fn payment_required_response(challenge: PaymentChallenge, message: &str) -> HttpResponse {
    let www_authenticate = challenge.www_authenticate();
    HttpResponse::PaymentRequired()
        .insert_header((header::WWW_AUTHENTICATE, www_authenticate))
        .json(PaymentRequiredBody::new(challenge, message))
}

/// High-level payment gate for `endpoint`.
/// Returns Ok(entry) if access is granted, or Err(HttpResponse) to return directly.
pub fn require_payment(
    req: &HttpRequest,
    state: &AppState,
    endpoint: &str,
) -> Result<PaymentLogEntry, HttpResponse> {
    let token = payment_header(req);
    match state.gate.access_resource(token.as_deref(), endpoint) {
        GateDecision::Granted(entry) => {
            PAYMENTS_ACCEPTED.inc();
            state.stats.record_accepted();
            metrics::record_request(endpoint, 200);
            Ok(entry)
        }
        GateDecision::Challenge(challenge) => {
            CHALLENGES_ISSUED.inc();
            state.stats.record_challenge();
            metrics::record_request(endpoint, 402);
            Err(payment_required_response(
                challenge,
                "This endpoint requires payment to access",
            ))
        }
        GateDecision::Rejected(challenge) => {
            PAYMENTS_REJECTED.inc();
            state.stats.record_rejected();
            metrics::record_request(endpoint, 402);
            Err(payment_required_response(
                challenge,
                "Payment authorization was not accepted",
            ))
        }
    }
}
