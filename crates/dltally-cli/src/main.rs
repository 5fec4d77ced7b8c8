//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging and dispatches to a handler.
//! Errors are reported on stderr and mapped to sysexits-style exit codes.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dltally_cli::handlers::serve::ServeArgs;
use dltally_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use dltally_core::DirectoryCreationStrategy;

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut stdout = io::stdout();

    match command {
        Commands::Serve {
            port,
            bind,
            route,
            static_dir,
            trust_proxy_headers,
            expose_log,
        } => {
            let args = ServeArgs {
                port,
                bind,
                route,
                static_dir,
                trust_proxy_headers,
                expose_log,
            };
            handlers::serve::execute(&config, args).await?;
        }
        Commands::Init { force } => {
            let ctx = bootstrap(&config, DirectoryCreationStrategy::AutoCreate)?;
            handlers::init::execute(&ctx, force, &mut stdout)?;
        }
        Commands::Count => {
            let ctx = bootstrap(&config, DirectoryCreationStrategy::Disallow)?;
            handlers::count::execute(&ctx, &mut stdout)?;
        }
        Commands::Log { tail } => {
            let ctx = bootstrap(&config, DirectoryCreationStrategy::Disallow)?;
            handlers::log::execute(&ctx, tail, &mut stdout)?;
        }
        Commands::Paths => {
            handlers::paths::execute(&config, &mut stdout)?;
        }
    }

    Ok(())
}
