//
//  exonet-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use exonet_api::cli::{Cli, Commands};
use exonet_api::exit_codes;

/// Variable holding a `tracing` filter directive, e.g. `EXONET_DEBUG=debug` or
/// `EXONET_DEBUG=exonet_api=trace`.
const DEBUG_ENV: &str = "EXONET_DEBUG";

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::for_error(&e)
        }
    };
    std::process::exit(code);
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(DEBUG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Login(args) => args.run(&cli.global),
        Commands::Zone(cmd) => cmd.run(&cli.global).await,
        Commands::Record(cmd) => cmd.run(&cli.global).await,
        Commands::Ticket(cmd) => cmd.run(&cli.global).await,
        Commands::Resource(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("exonet version {}", exonet_api::VERSION);
            Ok(())
        }
    }
}
