//! API Gateway proxy event and response shapes
//!
//! Both the lambda entrypoint and the HTTP server speak these types, so the
//! handler never sees transport details.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, X-User-Id, X-Auth-Token";

fn default_method() -> String {
    "GET".to_string()
}

/// Inbound invocation; fields the handler does not use are ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Accepted (X-User-Id, X-Auth-Token, ...) but never read
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

impl ApiEvent {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            query_string_parameters: None,
            headers: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    /// CORS preflight answer, empty body
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            ("Access-Control-Allow-Methods".to_string(), ALLOWED_METHODS.to_string()),
            ("Access-Control-Allow-Headers".to_string(), ALLOWED_HEADERS.to_string()),
        ]);
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn json(status_code: u16, body: String) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn not_found() -> Self {
        Self::json(404, r#"{"error": "Not found"}"#.to_string())
    }

    pub fn internal_error() -> Self {
        Self::json(500, r#"{"error": "Internal server error"}"#.to_string())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_defaults() {
        let event: ApiEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.http_method, "GET");
        assert!(event.query_string_parameters.is_none());
        assert!(event.headers.is_none());
    }

    #[test]
    fn test_event_null_query_and_extra_fields() {
        let event: ApiEvent = serde_json::from_value(json!({
            "httpMethod": "OPTIONS",
            "queryStringParameters": null,
            "headers": {"X-User-Id": "42", "X-Auth-Token": "secret"},
            "requestContext": {"requestId": "abc"},
            "isBase64Encoded": false
        }))
        .unwrap();
        assert_eq!(event.http_method, "OPTIONS");
        assert_eq!(event.query_param("action"), None);
        assert_eq!(event.headers.unwrap().len(), 2);
    }

    #[test]
    fn test_event_query_param() {
        let event: ApiEvent = serde_json::from_value(json!({
            "httpMethod": "GET",
            "queryStringParameters": {"action": "media"}
        }))
        .unwrap();
        assert_eq!(event.query_param("action"), Some("media"));
    }

    #[test]
    fn test_response_wire_shape() {
        let value = serde_json::to_value(ApiResponse::preflight()).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": {
                    "Access-Control-Allow-Origin": "*",
                    "Access-Control-Allow-Methods": "GET, POST, PUT, DELETE, OPTIONS",
                    "Access-Control-Allow-Headers": "Content-Type, X-User-Id, X-Auth-Token"
                },
                "body": "",
                "isBase64Encoded": false
            })
        );
    }

    #[test]
    fn test_not_found_body() {
        let response = ApiResponse::not_found();
        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, r#"{"error": "Not found"}"#);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }
}
