//
//  exonet-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! The token is kept in the configuration file. `EXONET_TOKEN` and `--token`
//! take precedence over it without changing the file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::{style, Term};

use crate::auth::{read_token_from_stdin, validate_token, PersonalAccessToken};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a personal access token
    Login(LoginArgs),

    /// Remove the stored token
    Logout,

    /// Show which token and environment are in use
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,
}

impl LoginArgs {
    /// Stores a token, read from stdin or a hidden prompt, in the config file.
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let token = if self.with_token {
            read_token_from_stdin()?
        } else {
            let term = Term::stderr();
            term.write_str("Paste your Exonet API token: ")?;
            term.read_secure_line()?.trim().to_string()
        };

        if !validate_token(&token) {
            bail!("Invalid token format: the token must be non-empty and contain no whitespace");
        }

        let mut config = Config::load()?;
        config.token = Some(token.clone());
        if let Some(environment) = global.environment {
            config.environment = environment;
        }
        config.save()?;

        tracing::debug!(environment = %config.environment, "Stored API token");

        let output = global.output();
        if output.is_json() {
            let result = serde_json::json!({
                "success": true,
                "environment": config.environment,
                "token": PersonalAccessToken::new(token).masked(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            output.write_success(&format!(
                "Logged in to the {} environment",
                style(config.environment).cyan()
            ));
        }
        Ok(())
    }
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => args.run(global),
            AuthSubcommand::Logout => self.logout(global),
            AuthSubcommand::Status => self.status(global),
        }
    }

    fn logout(&self, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        let output = global.output();

        if config.token.take().is_none() {
            output.write_warning("Not logged in");
            return Ok(());
        }

        config.save()?;
        output.write_success("Logged out");
        Ok(())
    }

    fn status(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        let (token, source) = match (&global.token, &config.token) {
            (Some(token), _) => (Some(token.as_str()), "environment or --token"),
            (None, Some(token)) => (Some(token.as_str()), "configuration file"),
            (None, None) => (None, "none"),
        };
        let environment = global.environment.unwrap_or(config.environment);
        let masked = token.map(|t| PersonalAccessToken::new(t).masked());

        if global.json {
            let result = serde_json::json!({
                "logged_in": token.is_some(),
                "token": masked,
                "source": source,
                "environment": environment,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        match masked {
            Some(masked) => println!(
                "{} Logged in with token {} ({})",
                style("✓").green(),
                masked,
                source
            ),
            None => println!("{} Not logged in", style("✗").red()),
        }
        println!("  Environment: {}", environment);
        Ok(())
    }
}
