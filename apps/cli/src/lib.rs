//! # Shopfront CLI Library
//!
//! The command-line storefront. `main.rs` only parses arguments and maps
//! the result to an exit code; everything else lives here.
//!
//! ## Module Organization
//! ```text
//! shopfront_cli/
//! ├── lib.rs          ◄─── You are here (logging & run)
//! ├── config.rs       ◄─── AppConfig: env > TOML > defaults
//! ├── context.rs      ◄─── App: builds CartStore and CatalogClient
//! ├── output.rs       ◄─── Text / JSON rendering
//! ├── commands/
//! │   ├── mod.rs      ◄─── clap definitions and dispatch
//! │   ├── cart.rs     ◄─── cart subcommands
//! │   └── product.rs  ◄─── products and categories subcommands
//! └── error.rs        ◄─── CliError with machine-readable codes
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Cli;
use config::AppConfig;
use context::App;
use error::CliResult;
use output::Output;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// 1. Initialize logging (stderr, `RUST_LOG`)
/// 2. Resolve configuration (env > file > defaults)
/// 3. Build the `App` context
/// 4. Dispatch the subcommand
pub async fn run(cli: Cli) -> CliResult<()> {
    init_tracing();

    let config = AppConfig::load(cli.config.clone())?;
    info!(api_url = %config.api_url, "Starting shopfront");

    let app = App::new(config, Output::new(cli.json));
    commands::execute(cli.command, &app).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for command output.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Quiet
/// - `RUST_LOG=shopfront_api=trace` - Trace catalog requests only
/// - Default: `info,shopfront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
