//
//  exonet-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Exonet API
//!
//! This module provides the client every request goes through. It owns the
//! HTTP connection pool, the API base URL and the authentication token, and
//! performs the actual round trips.
//!
//! ## Features
//!
//! - Production and test environments, or a custom base URL
//! - Bearer token injection on every request
//! - JSON:API `Accept` header and a versioned `User-Agent`
//! - Classification of failed responses into [`ApiError`]s
//! - An optional process-wide shared instance
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//!
//! let zone = client.resource("dns_zones").find("VX09kwR3KxNo").await?.into_resource()?;
//! println!("{}", zone.attribute("name")?);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::classifier::classify_response;
use super::error::{ApiError, Result};
use super::request::Request;
use crate::auth::PersonalAccessToken;
use crate::structures::{Document, ResourceIdentifier};

/// Media type sent in the `Accept` header of every request.
pub const MEDIA_TYPE: &str = "application/vnd.Exonet.v1+json";

/// Base URL of the production API.
pub const PRODUCTION_URL: &str = "https://api.exonet.nl/";

/// Base URL of the test API.
pub const TEST_URL: &str = "https://test-api.exonet.nl/";

static SHARED: Lazy<RwLock<Option<Client>>> = Lazy::new(|| RwLock::new(None));

/// The API environment a client talks to.
///
/// # Example
///
/// ```rust
/// use exonet_api::Environment;
///
/// assert_eq!(Environment::default(), Environment::Production);
/// assert_eq!(Environment::Test.api_url(), "https://test-api.exonet.nl/");
/// assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// `https://api.exonet.nl/`
    #[default]
    Production,
    /// `https://test-api.exonet.nl/`
    Test,
}

impl Environment {
    /// The base URL of this environment, with a trailing slash.
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Test => TEST_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for Environment {
    type Err = ApiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ApiError::invalid_request(format!(
                "Unknown environment '{}'. Expected 'production' or 'test'.",
                other
            ))),
        }
    }
}

/// Builder for [`Client`].
///
/// Every setting is optional. Without a token the client can still be built,
/// but every request fails with an authentication error until one is set.
///
/// # Example
///
/// ```rust
/// use exonet_api::{Client, Environment, PersonalAccessToken};
///
/// let client = Client::builder()
///     .token(PersonalAccessToken::new("your-token"))
///     .environment(Environment::Test)
///     .build()
///     .unwrap();
///
/// assert_eq!(client.api_url(), "https://test-api.exonet.nl/");
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    auth: Option<PersonalAccessToken>,
    environment: Environment,
    api_url: Option<String>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Sets the token used to authenticate requests.
    pub fn token(mut self, auth: PersonalAccessToken) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Selects the production or test API.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL entirely. Takes precedence over
    /// [`environment`](Self::environment).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`](super::error::Error::Network) if the
    /// underlying HTTP client could not be created.
    pub fn build(self) -> Result<Client> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("{}/{}", crate::CLIENT_NAME, crate::VERSION));

        let api_url = match self.api_url {
            Some(url) => format!("{}/", url.trim_end_matches('/')),
            None => self.environment.api_url().to_string(),
        };

        Ok(Client {
            http: reqwest::Client::builder().user_agent(user_agent).build()?,
            api_url,
            auth: self.auth,
        })
    }
}

/// The client for the Exonet API.
///
/// Cloning a client is cheap: clones share the same connection pool.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use exonet_api::{Client, PersonalAccessToken};
///
/// // Production API
/// let client = Client::new(PersonalAccessToken::new("your-token"))?;
///
/// // Register it as the shared default
/// let client = client.make_shared();
/// let same = Client::shared()?;
/// assert_eq!(same.api_url(), client.api_url());
/// # Ok::<(), exonet_api::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http: reqwest::Client,
    /// The base URL, always with a trailing slash
    api_url: String,
    /// Optional authentication token
    auth: Option<PersonalAccessToken>,
}

impl Client {
    /// Creates a production client authenticated with `auth`.
    pub fn new(auth: PersonalAccessToken) -> Result<Self> {
        Self::builder().token(auth).build()
    }

    /// Starts building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Returns the shared client, creating a default production client without a
    /// token if none was registered yet.
    pub fn shared() -> Result<Self> {
        let existing = SHARED.read().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(client) = existing {
            return Ok(client);
        }

        let mut slot = SHARED.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Self::builder().build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Registers this client as the shared instance, replacing any previous one.
    pub fn make_shared(self) -> Self {
        *SHARED.write().unwrap_or_else(PoisonError::into_inner) = Some(self.clone());
        self
    }

    /// Sets the authentication token.
    pub fn with_auth(mut self, auth: PersonalAccessToken) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Replaces the authentication token in place.
    pub fn set_auth(&mut self, auth: PersonalAccessToken) {
        self.auth = Some(auth);
    }

    /// Returns the configured token.
    ///
    /// # Errors
    ///
    /// Fails with an [`ErrorKind::Authentication`](super::error::ErrorKind)
    /// error when no token is set. The failure is also logged.
    pub fn auth(&self) -> Result<&PersonalAccessToken> {
        match &self.auth {
            Some(auth) => Ok(auth),
            None => {
                tracing::error!("No authentication method set.");
                Err(ApiError::authentication("No authentication method set.").into())
            }
        }
    }

    /// The base URL, with a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Strips the base URL from `link`, leaving a path relative to it.
    ///
    /// Links that do not start with the base URL are returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use exonet_api::Client;
    ///
    /// let client = Client::builder().build().unwrap();
    /// assert_eq!(
    ///     client.relative_path("https://api.exonet.nl/dns_zones?page%5Bnumber%5D=2"),
    ///     "dns_zones?page%5Bnumber%5D=2"
    /// );
    /// ```
    pub fn relative_path<'a>(&self, link: &'a str) -> &'a str {
        link.strip_prefix(self.api_url.as_str()).unwrap_or(link)
    }

    /// Starts a request for a resource type (or a nested resource path).
    pub fn resource(&self, resource: &str) -> Request {
        tracing::debug!(resource = resource, "Starting new request");
        Request::new(self.clone(), resource)
    }

    /// Creates a reference to an existing resource without fetching it.
    pub fn identifier(&self, resource_type: &str, id: &str) -> ResourceIdentifier {
        ResourceIdentifier::new(resource_type, id)
    }

    /// GETs `path` and maps the response body to a [`Document`].
    pub async fn get(&self, path: &str) -> Result<Document> {
        let body = self.execute(Method::GET, path, None).await?;
        Document::from_json(&body)
    }

    /// POSTs `payload` to `path` and maps the response body.
    pub async fn post(&self, path: &str, payload: &Value) -> Result<Document> {
        let body = self.execute(Method::POST, path, Some(payload)).await?;
        Document::from_json(&body)
    }

    /// POSTs relationship linkage to `path`. The API may answer without a body,
    /// in which case `None` is returned.
    pub async fn post_relationship(&self, path: &str, payload: &Value) -> Result<Option<Document>> {
        let body = self.execute(Method::POST, path, Some(payload)).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Document::from_json(&body).map(Some)
    }

    /// PATCHes `path` with `payload`. The response body is not inspected.
    pub async fn patch(&self, path: &str, payload: &Value) -> Result<bool> {
        self.execute(Method::PATCH, path, Some(payload)).await?;
        Ok(true)
    }

    /// DELETEs `path`, optionally sending a body. The response body is not
    /// inspected.
    pub async fn delete(&self, path: &str, body: Option<&Value>) -> Result<bool> {
        self.execute(Method::DELETE, path, body).await?;
        Ok(true)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Performs one round trip and returns the raw response body.
    ///
    /// Any status of 300 or above is classified into an [`ApiError`].
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String> {
        let auth = self.auth()?;
        let url = self.url(path);

        tracing::debug!(url = %url, "Sending [{}] request", method);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, MEDIA_TYPE);
        request = auth.apply_to_request(request);

        if method != Method::GET {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() >= 300 {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        status_code = status.as_u16(),
                        error = %e,
                        "Could not read error response body"
                    );
                    String::new()
                }
            };
            return Err(classify_response(status, &text).into());
        }

        tracing::debug!(status_code = status.as_u16(), "Request completed");
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_environment_urls() {
        let production = Client::builder().build().unwrap();
        assert_eq!(production.api_url(), PRODUCTION_URL);

        let test = Client::builder().environment(Environment::Test).build().unwrap();
        assert_eq!(test.api_url(), TEST_URL);
    }

    #[test]
    fn test_api_url_override_gets_trailing_slash() {
        let client = Client::builder()
            .environment(Environment::Test)
            .api_url("http://localhost:8080")
            .build()
            .unwrap();
        assert_eq!(client.api_url(), "http://localhost:8080/");
    }

    #[test]
    fn test_missing_auth_is_an_authentication_error() {
        let client = Client::builder().build().unwrap();
        let error = client.auth().unwrap_err();
        assert_eq!(error.kind(), Some(ErrorKind::Authentication));
        assert_eq!(error.to_string(), "No authentication method set.");
    }

    #[test]
    fn test_url_keeps_absolute_links() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.url("/dns_zones"), "https://api.exonet.nl/dns_zones");
        assert_eq!(client.url("http://self.test"), "http://self.test");
    }

    #[test]
    fn test_relative_path_leaves_foreign_links() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.relative_path("http://other.test/x"), "http://other.test/x");
    }

    #[test]
    fn test_unknown_environment() {
        let error = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_identifier_does_not_fetch() {
        let client = Client::builder().build().unwrap();
        let identifier = client.identifier("dns_zones", "abc");
        assert_eq!(identifier.resource_type(), "dns_zones");
        assert_eq!(identifier.id(), Some("abc"));
    }

    #[test]
    fn test_shared_client_is_replaced_by_later_registration() {
        let default = Client::shared().unwrap();
        assert_eq!(default.api_url(), PRODUCTION_URL);
        assert!(default.auth().is_err());

        Client::builder()
            .environment(Environment::Test)
            .token(PersonalAccessToken::new("first"))
            .build()
            .unwrap()
            .make_shared();
        let shared = Client::shared().unwrap();
        assert_eq!(shared.api_url(), TEST_URL);
        assert_eq!(shared.auth().unwrap().token(), "first");

        Client::builder()
            .api_url("http://localhost:8080")
            .token(PersonalAccessToken::new("second"))
            .build()
            .unwrap()
            .make_shared();
        let shared = Client::shared().unwrap();
        assert_eq!(shared.api_url(), "http://localhost:8080/");
        assert_eq!(shared.auth().unwrap().token(), "second");
    }
}
