//! # Shopfront CLI Entry Point
//!
//! ```text
//! $ shopfront products list --title shirt
//! $ shopfront cart add 4
//! $ shopfront cart checkout --all
//! ```

use std::process::ExitCode;

use clap::Parser;

use shopfront_cli::commands::Cli;
use shopfront_cli::output::report_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match shopfront_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::from(err.code.exit_code())
        }
    }
}
