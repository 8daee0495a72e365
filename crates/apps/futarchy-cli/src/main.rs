//! futarchy CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use futarchy_cli::{
    cli::{Cli, Commands},
    commands,
    config::{default_config_path, CliConfig},
    error::{CliError, CliResult},
    output::OutputFormat,
};
use futarchy_client::Futarchy402Client;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Logging goes to stderr so stdout stays clean for output and MCP.
fn init_logging(verbose: bool) {
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !verbose && !has_rust_log {
        return;
    }
    let mut filter = EnvFilter::from_default_env();
    if verbose {
        if let Ok(directive) = "futarchy=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print a user-friendly error message with a recovery hint.
fn print_error(e: &CliError) {
    eprintln!("{} [{}]: {}", "Error".red().bold(), e.label().yellow(), e);

    if let Some(hint) = e.hint() {
        eprintln!("{}: {}", "Hint".cyan(), hint);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = CliConfig::load(&config_path)?;
    let client_config = config.client_config(cli.api_url.as_deref())?;

    // Get output format
    let format: OutputFormat = cli.output.into();

    // Dispatch command
    let output = match cli.command {
        // Commands that need no client
        Commands::Tools { format: runtime } => commands::tools(runtime.into())?,

        Commands::Mcp => commands::mcp_server(client_config).await?,

        command => {
            let client = Futarchy402Client::new(client_config)?;
            dispatch(command, client, format).await?
        }
    };

    // Print output
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

async fn dispatch(
    command: Commands,
    client: Futarchy402Client,
    format: OutputFormat,
) -> CliResult<String> {
    let output = match command {
        // Governance commands
        Commands::Polls {
            status,
            treasury,
            limit,
            offset,
        } => {
            commands::polls(
                &client,
                format,
                status.map(Into::into),
                treasury,
                limit,
                offset,
            )
            .await?
        }

        Commands::Poll { id } => commands::poll(&client, format, &id).await?,

        Commands::Position { poll_id, voter } => {
            commands::position(&client, format, &poll_id, voter).await?
        }

        Commands::Stats => commands::stats(&client, format).await?,

        // Wallet & voting commands
        Commands::Wallet { check } => commands::wallet(&client, format, check)?,

        Commands::Vote {
            poll_id,
            side,
            slippage,
            key,
        } => commands::vote(&client, format, &poll_id, side.into(), slippage, key).await?,

        // Agent commands
        Commands::Call { tool, args } => commands::call(client, &tool, &args).await?,

        Commands::Tools { .. } | Commands::Mcp => {
            return Err(CliError::user("command does not use the API client"))
        }
    };
    Ok(output)
}
