// src/runner.rs
use std::path::{Path, PathBuf};

use crate::api::AppState;
use crate::conjure::Conjure;
use crate::models::{ConvertRequest, ConvertResponse, DocumentKind, DocumentResult};

/// Fresh temp file name for one document. Timestamp plus a random suffix
/// keeps concurrent requests apart; files are never removed.
pub fn temp_file_path(work_dir: &Path, kind: DocumentKind) -> PathBuf {
    work_dir.join(format!(
        "temp_{}_{}.{}",
        chrono::Utc::now().format("%Y%m%d%H%M%S%f"),
        uuid::Uuid::new_v4().simple(),
        kind.extension()
    ))
}

/// Drops everything up to and including the first `prefix` so the temp
/// file name does not leak into error messages. Cosmetic only.
pub fn redact(error: &str, prefix: &str) -> String {
    match error.find(prefix) {
        Some(start) => error[start + prefix.len()..].trim().to_string(),
        None => error.trim().to_string(),
    }
}

/// Type-checks one document and, if it is well formed, pretty-prints it
/// as JSON. Every failure becomes a `DocumentResult::Error`.
pub async fn convert_document(
    conjure: &Conjure,
    work_dir: &Path,
    text: &str,
    kind: DocumentKind,
) -> DocumentResult {
    let temp_file = temp_file_path(work_dir, kind);
    if let Err(e) = tokio::fs::write(&temp_file, format!("{}\n", text)).await {
        log::error!("Could not write {}: {}", temp_file.display(), e);
        return DocumentResult::Error(format!("Could not write temporary file: {}", e));
    }

    let checked = match conjure.type_check(&temp_file).await {
        Ok(output) => output,
        Err(e) => return DocumentResult::Error(e.to_string()),
    };
    if !checked.success {
        let prefix = format!("{}:", temp_file.display());
        return DocumentResult::Error(redact(&checked.stderr, &prefix));
    }

    match conjure.pretty_json(&temp_file).await {
        Ok(output) if output.success => DocumentResult::Success(output.stdout),
        Ok(output) => DocumentResult::Error(output.stderr),
        Err(e) => DocumentResult::Error(e.to_string()),
    }
}

/// Converts the specification and the parameter document concurrently.
pub async fn convert_request(state: &AppState, request: &ConvertRequest) -> ConvertResponse {
    let work_dir = &state.config.work_dir;
    let (spec, param) = futures::join!(
        convert_document(&state.conjure, work_dir, &request.spec, DocumentKind::Specification),
        convert_document(&state.conjure, work_dir, &request.param, DocumentKind::Parameter),
    );
    ConvertResponse { spec, param }
}
