// src/models.rs
use serde::{Deserialize, Serialize};

/// Which of the two submitted documents is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Specification,
    Parameter,
}

impl DocumentKind {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Specification => "essence",
            DocumentKind::Parameter => "param",
        }
    }
}

/// Per-document outcome, serialized as `{"status": "...", "data": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum DocumentResult {
    Success(String),
    Error(String),
}

impl DocumentResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DocumentResult::Success(_))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertRequest {
    pub spec: String,
    pub param: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub spec: DocumentResult,
    pub param: DocumentResult,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_shape() {
        let response = ConvertResponse {
            spec: DocumentResult::Error("3:1: unexpected token".to_string()),
            param: DocumentResult::Success("{}".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "spec": {"status": "error", "data": "3:1: unexpected token"},
                "param": {"status": "success", "data": "{}"}
            })
        );
    }

    #[test]
    fn test_request_requires_both_fields() {
        assert!(serde_json::from_str::<ConvertRequest>(r#"{"spec": "find x : bool"}"#).is_err());
        let req: ConvertRequest =
            serde_json::from_str(r#"{"spec": "find x : bool", "param": ""}"#).unwrap();
        assert_eq!(req.param, "");
    }
}
