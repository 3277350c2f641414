//! HTTP adapter for the validation API
//!
//! Wraps the four endpoints behind typed calls and normalizes every
//! failure into the `ApiError` taxonomy. The adapter owns nothing but the
//! HTTP client and base URL; it never touches the session store.

use crate::model::{FollowUpExchange, HealthStatus, ThreadHistory, ValidationResult};
use crate::request::ValidationRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-request timeout. Validation fans out to several hosted models, so
/// this is generous.
const REQUEST_TIMEOUT_SECS: u64 = 180;
/// Health probes should answer quickly or not at all.
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Maximum length of a raw error body quoted back to the user.
const MAX_ERROR_BODY_LEN: usize = 200;

const GENERIC_FAILURE: &str = "The validation service returned an unexpected error.";

/// Network-facing error taxonomy. Pre-flight failures live in
/// `request::BuildError`; everything here happened after dispatch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 422 with field-level errors, already folded into one
    /// multi-line, user-facing message.
    #[error("{0}")]
    UnprocessableInput(String),
    /// Any other non-success status.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    /// No response at all.
    #[error("Could not reach the validation service. Is the server running?")]
    NetworkUnavailable(#[source] reqwest::Error),
    /// A success status whose body did not parse as the expected type.
    #[error("The validation service returned a malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct ValidateBody {
    idea: String,
    selected_critics: Vec<String>,
}

#[derive(Serialize)]
struct FollowUpBody<'a> {
    thread_id: &'a str,
    question: &'a str,
}

/// FastAPI-style error body. `detail` is either a plain string or a list
/// of `{loc, msg}` records for 422 responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// Client for the validation API.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Url {
        // The base URL is validated at startup; joining a fixed path
        // cannot fail after that.
        self.base
            .join(path)
            .unwrap_or_else(|_| self.base.clone())
    }

    /// Submit an idea for validation. `POST /api/validate`.
    pub async fn submit(&self, request: &ValidationRequest) -> Result<ValidationResult, ApiError> {
        let body = ValidateBody {
            idea: request.compose_idea(),
            selected_critics: request.selected_critics.clone(),
        };
        self.post_json(self.endpoint("/api/validate"), &body).await
    }

    /// Ask a follow-up question on an existing thread. `POST /api/follow-up`.
    pub async fn ask_follow_up(
        &self,
        thread_id: &str,
        question: &str,
    ) -> Result<FollowUpExchange, ApiError> {
        let body = FollowUpBody {
            thread_id,
            question,
        };
        let mut exchange: FollowUpExchange =
            self.post_json(self.endpoint("/api/follow-up"), &body).await?;
        if exchange.question.is_empty() {
            exchange.question = question.to_string();
        }
        Ok(exchange)
    }

    /// Retrieve the prior conversation for a thread. `GET /api/history/{id}`.
    pub async fn history(&self, thread_id: &str) -> Result<ThreadHistory, ApiError> {
        let url = self.endpoint(&format!("/api/history/{}", thread_id));
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::NetworkUnavailable)?;
        Self::decode(response).await
    }

    /// Probe `GET /health`. Reduces every failure to `false`; a health
    /// check must never block or break the main workflow.
    pub async fn check_health(&self) -> bool {
        let url = self.endpoint("/health");
        let response = match self
            .http
            .get(url)
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(r) => r,
            Err(_) => return false,
        };
        if !response.status().is_success() {
            return false;
        }
        match response.json::<HealthStatus>().await {
            Ok(health) => health.backboard_connected || health.status == "healthy",
            Err(_) => false,
        }
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(ApiError::NetworkUnavailable)?;
        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(ApiError::NetworkUnavailable)?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(ApiError::MalformedResponse);
        }
        Err(normalize_error(status.as_u16(), &text))
    }
}

/// Fold a non-success response body into a single user-facing error.
fn normalize_error(status: u16, body: &str) -> ApiError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

    if status == 422 {
        if let Some(detail) = parsed.as_ref().and_then(|b| b.detail.as_ref()) {
            if let Ok(fields) = serde_json::from_value::<Vec<FieldError>>(detail.clone()) {
                if !fields.is_empty() {
                    let message = fields
                        .iter()
                        .map(|f| format!("• {}: {}", field_name(&f.loc), f.msg))
                        .collect::<Vec<_>>()
                        .join("\n");
                    return ApiError::UnprocessableInput(message);
                }
            }
        }
    }

    let message = parsed
        .and_then(|b| match b.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => b.message.filter(|m| !m.is_empty()),
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                format!("Server error {}: {}", status, truncate(body, MAX_ERROR_BODY_LEN))
            }
        });

    ApiError::RequestFailed { status, message }
}

/// The last string segment of a pydantic `loc` path, skipping the
/// leading "body" marker.
fn field_name(loc: &[serde_json::Value]) -> String {
    loc.iter()
        .filter_map(|v| v.as_str())
        .filter(|s| *s != "body" && *s != "query" && *s != "path")
        .next_back()
        .unwrap_or("input")
        .to_string()
}

/// Truncate a string for display (Unicode-safe).
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let byte_idx = s
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}... (truncated)", &s[..byte_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::IdeaForm;

    fn client_for(url: &str) -> ApiClient {
        ApiClient::new(Url::parse(url).unwrap()).unwrap()
    }

    /// Port 1 on loopback is never listening; connections are refused
    /// immediately instead of timing out.
    const DEAD_ORIGIN: &str = "http://127.0.0.1:1";

    #[test]
    fn unprocessable_input_concatenates_field_errors() {
        let body = r#"{"detail": [
            {"loc": ["body", "description"], "msg": "too short"},
            {"loc": ["body", "idea_name"], "msg": "field required"}
        ]}"#;
        let error = normalize_error(422, body);
        match error {
            ApiError::UnprocessableInput(message) => {
                assert_eq!(
                    message,
                    "• description: too short\n• idea_name: field required"
                );
            }
            other => panic!("expected UnprocessableInput, got {:?}", other),
        }
    }

    #[test]
    fn single_422_field_error_matches_contract() {
        let body = r#"{"detail": [{"loc": ["body", "description"], "msg": "too short"}]}"#;
        match normalize_error(422, body) {
            ApiError::UnprocessableInput(message) => {
                assert_eq!(message, "• description: too short");
            }
            other => panic!("expected UnprocessableInput, got {:?}", other),
        }
    }

    #[test]
    fn string_detail_is_surfaced_verbatim() {
        let body = r#"{"detail": "Missing 'idea' in request body."}"#;
        match normalize_error(400, body) {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing 'idea' in request body.");
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn message_field_is_the_second_choice() {
        let body = r#"{"message": "internal error"}"#;
        match normalize_error(500, body) {
            ApiError::RequestFailed { message, .. } => assert_eq!(message, "internal error"),
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_body_falls_back_to_generic_message() {
        match normalize_error(502, "<html>Bad Gateway</html>") {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, 502);
                assert!(message.starts_with("Server error 502"));
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn empty_body_yields_generic_message() {
        match normalize_error(503, "") {
            ApiError::RequestFailed { message, .. } => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[test]
    fn field_name_skips_location_markers() {
        let loc = vec![
            serde_json::json!("body"),
            serde_json::json!("idea_name"),
        ];
        assert_eq!(field_name(&loc), "idea_name");
        assert_eq!(field_name(&[]), "input");
        // Numeric indices (nested list errors) are skipped too.
        let loc = vec![
            serde_json::json!("body"),
            serde_json::json!("selected_critics"),
            serde_json::json!(0),
        ];
        assert_eq!(field_name(&loc), "selected_critics");
    }

    #[test]
    fn truncate_is_unicode_safe() {
        assert_eq!(truncate("héllo wörld", 5), "héllo... (truncated)");
        assert_eq!(truncate("short", 10), "short");
    }

    #[tokio::test]
    async fn check_health_returns_false_on_network_failure() {
        let client = client_for(DEAD_ORIGIN);
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn submit_surfaces_network_unavailable() {
        let client = client_for(DEAD_ORIGIN);
        let request = IdeaForm {
            idea_name: "PlantPal".to_string(),
            description: "An app that reminds people to water their plants".to_string(),
            target_market: "urban plant owners".to_string(),
            problem_solving: "People forget to water plants and they die".to_string(),
            unique_value: String::new(),
            selected_critics: Vec::new(),
        }
        .build()
        .unwrap();

        match client.submit(&request).await {
            Err(ApiError::NetworkUnavailable(_)) => {}
            other => panic!("expected NetworkUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn follow_up_surfaces_network_unavailable() {
        let client = client_for(DEAD_ORIGIN);
        match client.ask_follow_up("t-1", "what about pricing?").await {
            Err(ApiError::NetworkUnavailable(_)) => {}
            other => panic!("expected NetworkUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn validate_body_serializes_combined_shape() {
        let body = ValidateBody {
            idea: "Idea: PlantPal".to_string(),
            selected_critics: vec!["vc".to_string(), "engineer".to_string()],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"idea\":\"Idea: PlantPal\""));
        assert!(json.contains("\"selected_critics\":[\"vc\",\"engineer\"]"));
    }
}
