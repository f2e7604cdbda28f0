//
//  exonet-api
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error Types for Exonet API Operations
//!
//! This module defines the error taxonomy returned by every fallible operation
//! in the crate. Errors reported by the API itself are represented by
//! [`ApiError`], which carries an [`ErrorKind`] together with the details the
//! API sent back (detail code, HTTP status, variables). Everything else that
//! can go wrong on the client side has its own [`Error`] variant.
//!
//! # Overview
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `Authentication` | HTTP 401, or no token configured |
//! | `InvalidRequest` | Error code `101.*`, or a request that cannot be built |
//! | `Validation` | HTTP 422, or error code `102.*` |
//! | `Authorization` | Error code `103.*` |
//! | `NotFound` | HTTP 404, or error code `104.*` |
//! | `Unknown` | Error code `501.*`, or nothing recognisable in the body |
//!
//! # Example
//!
//! ```rust
//! use exonet_api::{Error, ErrorKind};
//!
//! fn describe(result: exonet_api::Result<bool>) -> String {
//!     match result {
//!         Ok(_) => "done".to_string(),
//!         Err(Error::Api(e)) if e.kind() == ErrorKind::NotFound => "gone".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The category of an error reported by (or on behalf of) the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was not authenticated.
    Authentication,
    /// The request itself was invalid.
    InvalidRequest,
    /// One or more submitted values failed validation.
    Validation,
    /// The authenticated user may not perform the request.
    Authorization,
    /// The requested resource does not exist.
    NotFound,
    /// Anything that could not be classified.
    Unknown,
}

impl ErrorKind {
    /// Maps the three-digit category prefix of a vendor error code to a kind.
    ///
    /// Returns `None` for categories the API does not document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exonet_api::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_code_prefix("104"), Some(ErrorKind::NotFound));
    /// assert_eq!(ErrorKind::from_code_prefix("999"), None);
    /// ```
    pub fn from_code_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "101" => Some(Self::InvalidRequest),
            "102" => Some(Self::Validation),
            "103" => Some(Self::Authorization),
            "104" => Some(Self::NotFound),
            "501" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::InvalidRequest => "invalid request",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not found",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// An error reported by the Exonet API.
///
/// The message is always human readable: either the `detail` text the API
/// returned or one of the fixed fallbacks. Programmatic callers should match on
/// [`kind`](Self::kind) and, for validation errors, inspect
/// [`failed_validations`](Self::failed_validations).
///
/// # Example
///
/// ```rust
/// use exonet_api::{ApiError, ErrorKind};
///
/// let error = ApiError::new(ErrorKind::NotFound, "Zone does not exist.")
///     .with_status(404)
///     .with_detail_code("104.10001");
///
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// assert_eq!(error.to_string(), "Zone does not exist.");
/// assert_eq!(error.detail_code(), Some("104.10001"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    detail_code: Option<String>,
    variables: Map<String, Value>,
    failed_validations: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Creates an error of the given kind with a message and no further details.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            detail_code: None,
            variables: Map::new(),
            failed_validations: BTreeMap::new(),
        }
    }

    /// Shorthand for an [`ErrorKind::Authentication`] error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Shorthand for an [`ErrorKind::InvalidRequest`] error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Shorthand for an [`ErrorKind::Unknown`] error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Sets the HTTP status associated with this error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the vendor detail code (for example `102.10001`).
    pub fn with_detail_code(mut self, code: impl Into<String>) -> Self {
        self.detail_code = Some(code.into());
        self
    }

    /// Sets the variables map the API attached to the error.
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Records a failed validation for `field`, or for `generic` when the API
    /// did not name a field.
    pub fn add_failed_validation(&mut self, field: Option<&str>, description: impl Into<String>) {
        self.failed_validations
            .entry(field.unwrap_or("generic").to_string())
            .or_default()
            .push(description.into());
    }

    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The vendor detail code, when the API provided one.
    pub fn detail_code(&self) -> Option<&str> {
        self.detail_code.as_deref()
    }

    /// Additional information the API attached to the error.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Failed validations keyed by field name.
    ///
    /// Only populated for [`ErrorKind::Validation`] errors built from a 422
    /// response. Entries without a field are collected under `generic`.
    pub fn failed_validations(&self) -> &BTreeMap<String, Vec<String>> {
        &self.failed_validations
    }
}

/// Every error this crate can return.
#[derive(Debug, Error)]
pub enum Error {
    /// The API (or the client acting on its behalf) rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A resource attribute was read that the resource does not have.
    #[error("Undefined attribute: {0}")]
    UndefinedAttribute(String),

    /// The HTTP request could not be completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request or response body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A response was valid JSON but not a JSON:API document of the expected shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl Error {
    /// Returns the API error kind, if this is an API error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(e) => Some(e.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_validations_grouped_by_field() {
        let mut error = ApiError::new(ErrorKind::Validation, "There are 3 validation errors.");
        error.add_failed_validation(Some("name"), "The name is required.");
        error.add_failed_validation(Some("name"), "The name is too short.");
        error.add_failed_validation(None, "Something else.");

        let failed = error.failed_validations();
        assert_eq!(failed["name"].len(), 2);
        assert_eq!(failed["generic"], vec!["Something else.".to_string()]);
    }

    #[test]
    fn test_error_kind_lookup() {
        assert_eq!(ErrorKind::from_code_prefix("101"), Some(ErrorKind::InvalidRequest));
        assert_eq!(ErrorKind::from_code_prefix("102"), Some(ErrorKind::Validation));
        assert_eq!(ErrorKind::from_code_prefix("103"), Some(ErrorKind::Authorization));
        assert_eq!(ErrorKind::from_code_prefix("501"), Some(ErrorKind::Unknown));
        assert_eq!(ErrorKind::from_code_prefix("???"), None);
    }

    #[test]
    fn test_api_error_is_transparent() {
        let error: Error = ApiError::authentication("Unauthenticated").into();
        assert_eq!(error.to_string(), "Unauthenticated");
        assert_eq!(error.kind(), Some(ErrorKind::Authentication));
    }
}
