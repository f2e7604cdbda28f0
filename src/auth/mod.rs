//
//  exonet-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The Exonet API authenticates every request with a personal access token,
//! sent as an `Authorization: Bearer <token>` header.
//!
//! ## Creating a Token
//!
//! 1. Sign in to the Exonet customer portal
//! 2. Open your account settings and select "API tokens"
//! 3. Create a token and copy it; it is only shown once
//!
//! ## Example
//!
//! ```rust,no_run
//! use exonet_api::auth::{read_token_from_stdin, validate_token, PersonalAccessToken};
//!
//! fn token_from_pipe() -> std::io::Result<Option<PersonalAccessToken>> {
//!     let token = read_token_from_stdin()?;
//!     Ok(validate_token(&token).then(|| PersonalAccessToken::new(token)))
//! }
//! ```

mod token;

pub use token::*;
