//
//  exonet-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod config;
mod record;
mod resource;
mod ticket;
mod zone;

pub use auth::{AuthCommand, LoginArgs};
pub use config::ConfigCommand;
pub use record::RecordCommand;
pub use resource::ResourceCommand;
pub use ticket::TicketCommand;
pub use zone::ZoneCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{ApiError, Client, Environment};
use crate::auth::PersonalAccessToken;
use crate::config::Config;
use crate::output::OutputWriter;

#[derive(Parser, Debug)]
#[command(
    name = "exonet",
    version,
    about = "Work with the Exonet API from the command line",
    long_about = "exonet is a CLI for the Exonet JSON:API.\n\n\
                  It lists and edits DNS zones, records, tickets and any other API resource.",
    propagate_version = true,
    after_help = "Use 'exonet <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Personal access token (overrides the configured token)
    #[arg(long, global = true, env = "EXONET_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API environment to use
    #[arg(long, global = true, env = "EXONET_ENVIRONMENT", value_enum)]
    pub environment: Option<Environment>,

    /// Base URL of the API (overrides the environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Builds a client from the configuration file, overridden by these
    /// options.
    pub fn client(&self) -> Result<Client> {
        let config = Config::load()?;
        self.client_with(&config)
    }

    /// Builds a client from `config` with these options on top.
    ///
    /// An `--environment` (or `EXONET_ENVIRONMENT`) also discards the
    /// configured `api_url`, which would otherwise take over the environment's
    /// URL. `--api-url` beats both.
    pub fn client_with(&self, config: &Config) -> Result<Client> {
        let token = self.token.as_ref().or(config.token.as_ref()).ok_or_else(|| {
            ApiError::authentication(
                "Not logged in. Run 'exonet auth login', set EXONET_TOKEN, or pass --token.",
            )
        })?;

        let mut builder = Client::builder()
            .token(PersonalAccessToken::new(token.as_str()))
            .environment(self.environment.unwrap_or(config.environment));

        let api_url = match (&self.api_url, self.environment) {
            (Some(api_url), _) => Some(api_url),
            (None, Some(_)) => None,
            (None, None) => config.api_url.as_ref(),
        };
        if let Some(api_url) = api_url {
            builder = builder.api_url(api_url.as_str());
        }

        Ok(builder.build()?)
    }

    /// The page size to use: the one given on the command line, else the
    /// configured default.
    pub fn page_size(&self, requested: Option<u32>, config: &Config) -> Option<u32> {
        requested.or(config.page_size)
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store or remove the API token
    Auth(AuthCommand),

    /// Shortcut for 'auth login'
    Login(LoginArgs),

    /// DNS zones
    Zone(ZoneCommand),

    /// DNS records
    Record(RecordCommand),

    /// Support tickets
    Ticket(TicketCommand),

    /// Any API resource by type
    #[command(visible_alias = "api")]
    Resource(ResourceCommand),

    /// Read and change the configuration
    Config(ConfigCommand),

    /// Print the version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_token_wins_over_config() {
        let config = Config {
            token: Some("from-config".to_string()),
            api_url: Some("http://localhost:9000".to_string()),
            ..Config::default()
        };
        let global = GlobalOptions {
            token: Some("from-flag".to_string()),
            ..GlobalOptions::default()
        };

        let client = global.client_with(&config).unwrap();
        assert_eq!(client.auth().unwrap().token(), "from-flag");
        assert_eq!(client.api_url(), "http://localhost:9000/");
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let error = GlobalOptions::default()
            .client_with(&Config::default())
            .unwrap_err();
        assert!(error.to_string().contains("Not logged in"));
    }

    #[test]
    fn test_environment_flag() {
        let global = GlobalOptions {
            token: Some("t".to_string()),
            environment: Some(Environment::Test),
            ..GlobalOptions::default()
        };
        let client = global.client_with(&Config::default()).unwrap();
        assert_eq!(client.api_url(), "https://test-api.exonet.nl/");
    }

    #[test]
    fn test_environment_flag_beats_configured_api_url() {
        let config = Config {
            token: Some("t".to_string()),
            api_url: Some("http://localhost:9000".to_string()),
            ..Config::default()
        };
        let global = GlobalOptions {
            environment: Some(Environment::Test),
            ..GlobalOptions::default()
        };

        let client = global.client_with(&config).unwrap();
        assert_eq!(client.api_url(), "https://test-api.exonet.nl/");
    }

    #[test]
    fn test_api_url_flag_beats_environment() {
        let config = Config {
            token: Some("t".to_string()),
            environment: Environment::Test,
            ..Config::default()
        };
        let global = GlobalOptions {
            environment: Some(Environment::Production),
            api_url: Some("http://127.0.0.1:8080".to_string()),
            ..GlobalOptions::default()
        };

        let client = global.client_with(&config).unwrap();
        assert_eq!(client.api_url(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_configured_environment_without_flags() {
        let config = Config {
            token: Some("t".to_string()),
            environment: Environment::Test,
            ..Config::default()
        };
        let client = GlobalOptions::default().client_with(&config).unwrap();
        assert_eq!(client.api_url(), "https://test-api.exonet.nl/");
    }

    #[test]
    fn test_page_size_falls_back_to_config() {
        let config = Config {
            page_size: Some(25),
            ..Config::default()
        };
        let global = GlobalOptions::default();
        assert_eq!(global.page_size(Some(5), &config), Some(5));
        assert_eq!(global.page_size(None, &config), Some(25));
        assert_eq!(global.page_size(None, &Config::default()), None);
    }

    #[test]
    fn test_login_shortcut() {
        let cli = Cli::try_parse_from(["exonet", "login", "--with-token"]).unwrap();
        assert!(matches!(cli.command, Commands::Login(LoginArgs { with_token: true })));
    }
}
