//
//  exonet-api
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Personal access token handling.

use std::fmt;

use reqwest::RequestBuilder;

/// Reads a token from standard input.
///
/// Only the first line is read, and it is trimmed of surrounding whitespace.
/// Works with piped input: `echo "token" | exonet auth login`.
pub fn read_token_from_stdin() -> std::io::Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Checks the format of a token: it must be non-empty and contain no
/// whitespace.
///
/// This does not check the token with the API.
///
/// # Example
///
/// ```rust
/// use exonet_api::auth::validate_token;
///
/// assert!(validate_token("eyJ0eXAiOiJKV1Qi"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// A personal access token for the Exonet API.
///
/// The token can be replaced at any time; clients holding a clone keep the
/// value they were given.
///
/// # Example
///
/// ```rust
/// use exonet_api::PersonalAccessToken;
///
/// let mut token = PersonalAccessToken::new("first");
/// token.set_token("second");
/// assert_eq!(token.token(), "second");
///
/// // The value never shows up in debug output
/// assert!(!format!("{:?}", token).contains("second"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken {
    token: String,
}

impl PersonalAccessToken {
    /// Wraps a token string. No validation is performed.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token value.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Replaces the token value.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Adds the `Authorization: Bearer <token>` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// The token with everything but the last four characters masked, for
    /// display.
    pub fn masked(&self) -> String {
        let visible: String = self
            .token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", visible)
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalAccessToken")
            .field("token", &"<redacted>")
            .finish()
    }
}
