//! HTTP Response Utilities
//!
//! Helper functions for turning HTTP replies of remote endpoints into call
//! results.

use crate::constants::{ERROR_FIELD, RESULT_FIELD};
use rivet_domain::error::{Error, Result};
use reqwest::Response;
use serde_json::Value;

/// Format error message for a remote endpoint
fn remote_error(endpoint: &str, context: &str, details: &str) -> Error {
    Error::remote(format!("{endpoint} {context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse the JSON reply
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `endpoint` - Endpoint URL for error messages
    ///
    /// # Returns
    /// The decoded return value on success, or a remote error
    pub async fn check_and_parse(response: Response, endpoint: &str) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 | 403 => remote_error(endpoint, "authentication failed", &error_text),
                404 => remote_error(endpoint, "no such remote method", &error_text),
                500..=599 => {
                    remote_error(endpoint, &format!("server error ({code})"), &error_text)
                }
                _ => remote_error(endpoint, &format!("request failed ({code})"), &error_text),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| remote_error(endpoint, "response read failed", &e.to_string()))?;
        Self::parse_body(&bytes, endpoint)
    }

    /// Decode a raw 2xx body; an empty body is a `null` result
    pub fn parse_body(bytes: &[u8], endpoint: &str) -> Result<Value> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        let body: Value = serde_json::from_slice(bytes)
            .map_err(|e| remote_error(endpoint, "response parse failed", &e.to_string()))?;
        Self::decode_reply(body, endpoint)
    }

    /// Extract the return value from a reply body
    ///
    /// `{"result": v}` yields `v`, `{"error": msg}` a remote error, and any
    /// other body is returned unchanged.
    pub fn decode_reply(body: Value, endpoint: &str) -> Result<Value> {
        match body {
            Value::Object(mut fields) => {
                if let Some(message) = fields.remove(ERROR_FIELD).filter(|e| !e.is_null()) {
                    let details = message
                        .as_str()
                        .map_or_else(|| message.to_string(), ToString::to_string);
                    return Err(remote_error(endpoint, "remote method failed", &details));
                }
                match fields.remove(RESULT_FIELD) {
                    Some(result) => Ok(result),
                    None => Ok(Value::Object(fields)),
                }
            }
            other => Ok(other),
        }
    }
}
