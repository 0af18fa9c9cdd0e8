// src/api/routes.rs
use actix_web::web;
use super::handlers;

/// Upper bound for a POSTed spec/param pair.
const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(
            web::resource("/{tail:.*}")
                .route(web::post().to(handlers::convert))
                .route(web::get().to(handlers::serve_asset)),
        );
}
