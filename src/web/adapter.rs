//! Framework-neutral request adapter.

use crate::value::RawParams;

use super::ExtractParams;

/// Framework-neutral holder for a request's decoded parameters.
///
/// Framework integrations fill it from their own request types (typically via
/// `From<FrameworkRequest>`). Query parameters are added as already decoded
/// values; a JSON body is parsed from text. When both define a key, the body
/// wins.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_params::web::{ExtractParams, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.add_query_param("page", json!("2"));
/// adapter.set_json_body(r#"{"user": {"name": "alice"}}"#).unwrap();
///
/// let raw = adapter.raw_params();
/// assert_eq!(raw["page"], json!("2"));
/// assert_eq!(raw["user"]["name"], json!("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Unique request identifier
    request_id: String,
    /// Decoded query parameters
    query_params: RawParams,
    /// Decoded body parameters
    body_params: RawParams,
}

impl RequestAdapter {
    /// Creates an adapter with no parameters.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            query_params: RawParams::new(),
            body_params: RawParams::new(),
        }
    }

    /// Adds a decoded query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.query_params.insert(key.into(), value);
    }

    /// Adds a decoded body parameter, as from a URL-encoded form.
    pub fn add_body_param(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.body_params.insert(key.into(), value);
    }

    /// Parses a JSON object body and merges its keys into the body parameters.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `body` is not a JSON object.
    pub fn set_json_body(&mut self, body: &str) -> Result<(), serde_json::Error> {
        let parsed: RawParams = serde_json::from_str(body)?;
        self.body_params.extend(parsed);
        Ok(())
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl ExtractParams for RequestAdapter {
    fn raw_params(&self) -> RawParams {
        let mut merged = self.query_params.clone();
        for (key, value) in &self.body_params {
            merged.insert(key.clone(), value.clone());
        }

        tracing::debug!(
            request_id = %self.request_id,
            keys = merged.len(),
            "extracted request parameters"
        );
        merged
    }
}
