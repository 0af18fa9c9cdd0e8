// src/api/handlers/assets.rs
use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse};
use std::path::PathBuf;

use crate::api::AppState;
use crate::config::ServerConfig;

/// Maps an allowlisted request path onto a file under `static_dir`.
/// Anything not on the allowlist resolves to nothing, whether or not a
/// file of that name exists.
pub fn resolve_asset(config: &ServerConfig, path: &str) -> Option<PathBuf> {
    if !config.is_allowed(path) {
        return None;
    }
    let relative = match path {
        "/" => "index.html",
        other => other.trim_start_matches('/'),
    };
    Some(config.static_dir.join(relative))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("404 Not Found")
}

pub async fn serve_asset(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let Some(file) = resolve_asset(&state.config, req.path()) else {
        log::debug!("GET {} is not an allowed path", req.path());
        return not_found();
    };

    match NamedFile::open_async(&file).await {
        Ok(named) => named.into_response(&req),
        Err(e) => {
            log::warn!("Could not open {}: {}", file.display(), e);
            not_found()
        }
    }
}
