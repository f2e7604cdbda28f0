//
//  exonet-api
//  api/classifier.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response Error Classification
//!
//! Turns a failed HTTP response (status 300 and above) into an [`ApiError`].
//!
//! The Exonet API returns errors in the format:
//! ```json
//! {"errors": [{"status": 422, "code": "102.10001", "detail": "Human readable message", "variables": {"field": "name"}}]}
//! ```
//!
//! Classification is single-shot and follows a fixed priority:
//!
//! 1. `401` is always an authentication error.
//! 2. `404` is always a not-found error.
//! 3. `422` aggregates every entry of `errors` into one validation error.
//! 4. Otherwise the category prefix of `errors[0].code` picks the kind.
//! 5. If none of the above applies, the error is unknown.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{ApiError, ErrorKind};

/// Message used when nothing in the response can be classified.
pub const UNKNOWN_ERROR_MESSAGE: &str = "There was an unknown exception.";

#[derive(Debug, Default, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    variables: Option<Value>,
}

impl ErrorEntry {
    /// The entry status, accepting both numbers and numeric strings.
    fn status(&self) -> Option<u16> {
        match self.status.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Variables are an object, but the API sends `[]` when there are none.
    fn variables(&self) -> Map<String, Value> {
        match &self.variables {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    fn field(&self) -> Option<&str> {
        match &self.variables {
            Some(Value::Object(map)) => map.get("field").and_then(Value::as_str),
            _ => None,
        }
    }

    fn detail(&self) -> &str {
        self.detail.as_deref().unwrap_or_default()
    }
}

/// Classifies a failed response.
///
/// The status code and raw body are logged at error level before the error is
/// built, whatever branch ends up being taken.
///
/// # Parameters
///
/// * `status` - The HTTP status code of the response
/// * `body` - The raw response body
///
/// # Example
///
/// ```rust
/// use exonet_api::api::classify_response;
/// use exonet_api::ErrorKind;
/// use reqwest::StatusCode;
///
/// let error = classify_response(StatusCode::UNAUTHORIZED, "");
/// assert_eq!(error.kind(), ErrorKind::Authentication);
/// assert_eq!(error.message(), "Unauthenticated");
/// ```
pub fn classify_response(status: StatusCode, body: &str) -> ApiError {
    tracing::error!(status_code = status.as_u16(), contents = body, "Request failed");

    let document: ErrorDocument = serde_json::from_str(body).unwrap_or_default();
    let http_status = status.as_u16();

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::authentication("Unauthenticated").with_status(http_status);
    }

    if status == StatusCode::NOT_FOUND {
        let message = document
            .errors
            .first()
            .map(|e| e.detail().to_string())
            .unwrap_or_default();
        return ApiError::new(ErrorKind::NotFound, message).with_status(http_status);
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY && !document.errors.is_empty() {
        return validation_error(&document.errors, http_status);
    }

    document
        .errors
        .first()
        .and_then(|entry| from_error_code(entry, http_status))
        .unwrap_or_else(|| ApiError::unknown(UNKNOWN_ERROR_MESSAGE).with_status(http_status))
}

fn validation_error(entries: &[ErrorEntry], http_status: u16) -> ApiError {
    let message = if entries.len() == 1 {
        "There is 1 validation error.".to_string()
    } else {
        format!("There are {} validation errors.", entries.len())
    };

    let mut error = ApiError::new(ErrorKind::Validation, message).with_status(http_status);
    if let Some(code) = entries.first().and_then(|e| e.code.as_deref()) {
        error = error.with_detail_code(code);
    }

    for entry in entries {
        error.add_failed_validation(entry.field(), entry.detail());
    }

    error
}

fn from_error_code(entry: &ErrorEntry, http_status: u16) -> Option<ApiError> {
    let code = entry.code.as_deref()?;
    let kind = ErrorKind::from_code_prefix(code.get(..3)?)?;

    Some(
        ApiError::new(kind, entry.detail())
            .with_status(entry.status().unwrap_or(http_status))
            .with_detail_code(code)
            .with_variables(entry.variables()),
    )
}
