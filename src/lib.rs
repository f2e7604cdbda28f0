//
//  exonet-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Exonet API Library
//!
//! A client for the Exonet JSON:API REST service, plus the `exonet`
//! command-line tool built on top of it.
//!
//! ## Overview
//!
//! The API speaks [JSON:API](https://jsonapi.org). Responses are mapped to
//! typed structures: single [`Resource`]s, bare [`ResourceIdentifier`]s and
//! paginated [`ResourceSet`]s. Requests are built with a fluent [`Request`]
//! builder, and failed responses become [`ApiError`]s with a stable
//! [`ErrorKind`].
//!
//! ## Features
//!
//! - **Fluent requests**: Paging (`page[size]`, `page[number]`) and filters (`filter[name]`)
//! - **Change tracking**: `patch` only sends the attributes and relationships you changed
//! - **Relationships**: Lazy relation requests, linking and unlinking
//! - **Pagination**: Follow `next`/`prev`/`first`/`last` links, or fetch every page at once
//! - **Typed errors**: Authentication, validation (with every failed field), not found and more
//!
//! ## Module Structure
//!
//! - [`api`]: The HTTP client, request builder and error types
//! - [`structures`]: JSON:API document mapping
//! - [`auth`]: Personal access tokens
//! - [`config`]: Configuration file management for the CLI
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use exonet_api::{Client, Environment, PersonalAccessToken};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::builder()
//!     .token(PersonalAccessToken::new("your-token"))
//!     .environment(Environment::Test)
//!     .build()?;
//!
//! let mut zone = client.resource("dns_zones").find("VX09kwR3KxNo").await?.into_resource()?;
//! zone.set_attribute("hostmaster", "dns@example.com");
//! zone.patch(&client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library logs through `tracing`: request lifecycle at `debug`, failed
//! responses at `error`. Nothing is printed unless the application installs a
//! subscriber.

pub mod cli;

pub mod api;

pub mod auth;

pub mod config;

pub mod output;

pub mod structures;

pub mod util;

pub use api::{
    ApiError, Client, ClientBuilder, Environment, Error, ErrorKind, FilterValue, Request, Result,
};

pub use auth::PersonalAccessToken;

pub use cli::Cli;

pub use config::Config;

pub use structures::{
    Document, Entry, Linkage, PayloadScope, Relation, Relationship, Resource, ResourceIdentifier,
    ResourceSet,
};

pub const APP_NAME: &str = "exonet";

/// Name sent in the `User-Agent` header, followed by `/<version>`.
pub const CLIENT_NAME: &str = "exonet-api-rs";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod exit_codes {
    use crate::api::{ApiError, Error, ErrorKind};

    pub const SUCCESS: i32 = 0;

    pub const ERROR: i32 = 1;

    pub const USAGE: i32 = 2;

    pub const AUTH_ERROR: i32 = 4;

    pub const NOT_FOUND: i32 = 8;

    /// Picks the exit code for an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> i32 {
        let kind = error
            .downcast_ref::<Error>()
            .and_then(Error::kind)
            .or_else(|| error.downcast_ref::<ApiError>().map(ApiError::kind));

        match kind {
            Some(ErrorKind::Authentication) => AUTH_ERROR,
            Some(ErrorKind::NotFound) => NOT_FOUND,
            _ => ERROR,
        }
    }

}
