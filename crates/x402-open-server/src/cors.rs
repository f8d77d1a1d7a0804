//! CORS configuration for the resource server.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

/// Build the CORS middleware from allowed origins. A `*` entry allows any origin.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(["GET", "OPTIONS"])
        .allowed_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-payment-authorization"),
        ])
        .expose_headers([header::WWW_AUTHENTICATE])
        .max_age(3600)
}
