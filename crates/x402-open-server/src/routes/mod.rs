pub mod api;
pub mod info;
pub mod metrics;

use actix_web::web;

/// Register every route of the resource server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(info::configure)
        .configure(api::configure)
        .configure(metrics::configure);
}
