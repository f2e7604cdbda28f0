//
//  exonet-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP side of the crate: the client that talks to
//! the Exonet JSON:API, the request builder, and the error types.
//!
//! ## Architecture
//!
//! - [`client`]: The [`Client`] with environment selection, authentication and transport
//! - [`request`]: The [`Request`] builder for paging, filtering and CRUD calls
//! - [`classifier`]: Turns failed responses into [`ApiError`]s
//! - [`error`]: The error taxonomy shared by the whole crate
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exonet_api::{Client, PersonalAccessToken};
//!
//! # async fn example() -> exonet_api::Result<()> {
//! let client = Client::new(PersonalAccessToken::new("your-token"))?;
//!
//! let zones = client.resource("dns_zones").size(5).page(2).get().await?.into_set()?;
//! for zone in zones.resources() {
//!     println!("{}", zone.attribute("name")?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failed responses become [`ApiError`]s with one of these kinds:
//!
//! - `Authentication`: 401 Unauthorized, or no token set
//! - `NotFound`: 404 Not Found
//! - `Validation`: 422 Unprocessable Entity, with every failed field
//! - `InvalidRequest`, `Authorization`, `Unknown`: picked from the vendor error code

pub mod classifier;
pub mod client;
pub mod error;
pub mod request;

pub use classifier::classify_response;
pub use client::{Client, ClientBuilder, Environment};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use request::{FilterValue, Request};
