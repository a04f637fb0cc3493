//! Client for the external analyze service.
//!
//! The service receives the displayed path together with the page URL and a
//! context hint, and answers with an arbitrary JSON object. Its structure is
//! never interpreted here: any object without an `error` field is a result,
//! anything else is a failure.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Longest rendered result, in characters.
pub const RESULT_DISPLAY_LIMIT: usize = 500;

/// Request body sent to `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub xpath: String,
    pub url: String,
    /// Sent as `html`, the field name the analyze service reads.
    #[serde(rename = "html", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The request never produced a response body.
    #[error("Analyze request failed: {0}")]
    Transport(String),
    /// The service answered with an error payload.
    #[error("Analyze service error: {0}")]
    Remote(String),
    /// The answer was not a JSON object.
    #[error("Malformed analyze response: {0}")]
    Malformed(String),
}

/// Anything that can analyze a path.
pub trait Analyzer {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, AnalyzeError>;
}

/// Blocking HTTP client for the analyze service.
pub struct HttpAnalyzer {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpAnalyzer {
    /// Creates a client for the service at `endpoint` (scheme, host and port).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AnalyzeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("xpathquill/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/api/analyze", self.endpoint)
    }
}

impl Analyzer for HttpAnalyzer {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, AnalyzeError> {
        let url = self.url();
        tracing::info!("POST {} for {}", url, request.xpath);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;

        // Error payloads come with 4xx/5xx statuses, so the body is read either way.
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        tracing::debug!("analyze answered {} ({} bytes)", status, body.len());

        interpret_response(&body)
    }
}

/// Classifies a response body.
///
/// ```
/// use xpathquill::analyze::{interpret_response, AnalyzeError};
///
/// assert!(interpret_response(r#"{"mappings": []}"#).is_ok());
/// assert_eq!(
///     interpret_response(r#"{"error": "urls required"}"#),
///     Err(AnalyzeError::Remote("urls required".into()))
/// );
/// assert!(matches!(interpret_response("[1, 2]"), Err(AnalyzeError::Malformed(_))));
/// ```
pub fn interpret_response(body: &str) -> Result<Value, AnalyzeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AnalyzeError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AnalyzeError::Malformed("expected a JSON object".to_string()))?;

    if let Some(error) = object.get("error") {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return Err(AnalyzeError::Remote(message));
    }
    Ok(value)
}

/// Pretty-prints a result for display, capped at [`RESULT_DISPLAY_LIMIT`].
pub fn render_result(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    if pretty.chars().count() <= RESULT_DISPLAY_LIMIT {
        pretty
    } else {
        let mut capped: String = pretty.chars().take(RESULT_DISPLAY_LIMIT).collect();
        capped.push('…');
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = AnalyzeRequest {
            xpath: "//h1".into(),
            url: "https://example.com".into(),
            context: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"xpath": "//h1", "url": "https://example.com"}));
    }

    #[test]
    fn test_context_is_sent_as_html() {
        let request = AnalyzeRequest {
            xpath: "//main".into(),
            url: "about:sample".into(),
            context: Some("main".into()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["html"], json!("main"));
        assert!(value.get("context").is_none());
    }

    #[test]
    fn test_non_string_error_is_remote() {
        assert_eq!(
            interpret_response(r#"{"error": {"code": 3}}"#),
            Err(AnalyzeError::Remote(r#"{"code":3}"#.into()))
        );
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            interpret_response("<html>oops</html>"),
            Err(AnalyzeError::Malformed(_))
        ));
    }

    #[test]
    fn test_render_result_is_capped() {
        let long = json!({ "text": "x".repeat(2000) });
        assert_eq!(render_result(&long).chars().count(), RESULT_DISPLAY_LIMIT + 1);
        assert_eq!(render_result(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_endpoint_url() {
        let analyzer = HttpAnalyzer::new("http://localhost:8789/", Duration::from_secs(1)).unwrap();
        assert_eq!(analyzer.url(), "http://localhost:8789/api/analyze");
    }
}
