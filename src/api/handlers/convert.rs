// src/api/handlers/convert.rs
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::api::AppState;
use crate::errors::HarnessError;
use crate::models::{ApiError, ConvertRequest};
use crate::runner;

/// POST handler: type-check and pretty-print the submitted spec and param.
///
/// The body is parsed by hand rather than through `web::Json` because the
/// front end does not always send a JSON content type.
pub async fn convert(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let parsed: Result<ConvertRequest, HarnessError> =
        serde_json::from_slice(&body).map_err(HarnessError::from);
    let request = match parsed {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected POST {}: {}", req.path(), e);
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            }));
        }
    };

    log::info!(
        "POST {} (spec: {} bytes, param: {} bytes)",
        req.path(),
        request.spec.len(),
        request.param.len()
    );

    let response = runner::convert_request(state.get_ref(), &request).await;

    log::info!(
        "Converted request: spec {}, param {}",
        if response.spec.is_success() { "ok" } else { "error" },
        if response.param.is_success() { "ok" } else { "error" }
    );

    Ok(HttpResponse::Ok().json(response))
}
