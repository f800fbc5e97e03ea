//! # CLI Commands
//!
//! ```text
//! shopfront [--config <path>] [--json]
//!   ├── cart        show | add | remove | set-qty | inc | dec | checkout | total | clear
//!   ├── products    list | search | show | create | update | delete | upload
//!   └── categories
//! ```

pub mod cart;
pub mod product;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::context::App;
use crate::error::CliResult;

pub use cart::CartCommand;
pub use product::ProductCommand;

/// Browse the catalog and manage a persistent cart.
#[derive(Debug, Parser)]
#[command(name = "shopfront", version, about)]
pub struct Cli {
    /// Config file (default: <config dir>/shopfront.toml)
    #[arg(long, global = true, env = "SHOPFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Read or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Browse and administer products
    #[command(subcommand)]
    Products(ProductCommand),

    /// List categories
    Categories,
}

pub async fn execute(command: Command, app: &App) -> CliResult<()> {
    match command {
        Command::Cart(command) => cart::run(command, app).await,
        Command::Products(command) => product::run(command, app).await,
        Command::Categories => product::list_categories(app).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shopfront_core::Money;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["shopfront"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(
            parse(&["cart", "add", "4", "--quantity", "2"]),
            Command::Cart(CartCommand::Add { id: 4, quantity: 2 })
        );
        assert_eq!(
            parse(&["cart", "set-qty", "4", "-3"]),
            Command::Cart(CartCommand::SetQty { id: 4, quantity: -3 })
        );
        assert_eq!(
            parse(&["cart", "checkout", "1", "2"]),
            Command::Cart(CartCommand::Checkout { ids: vec![1, 2], all: false })
        );
        assert_eq!(
            parse(&["cart", "total", "--all"]),
            Command::Cart(CartCommand::Total { ids: vec![], all: true })
        );
    }

    #[test]
    fn test_checkout_needs_a_selection() {
        assert!(Cli::try_parse_from(["shopfront", "cart", "checkout"]).is_err());
        assert!(Cli::try_parse_from(["shopfront", "cart", "checkout", "1", "--all"]).is_err());
    }

    #[test]
    fn test_parse_product_create() {
        let command = parse(&[
            "products", "create", "--title", "Lamp", "--price", "19.99", "--description",
            "Warm", "--category", "3", "--image", "https://i.imgur.com/a.png",
        ]);
        match command {
            Command::Products(ProductCommand::Create { price, images, .. }) => {
                assert_eq!(price, Money::from_cents(1999));
                assert_eq!(images, vec!["https://i.imgur.com/a.png".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_price_is_rejected() {
        assert!(Cli::try_parse_from([
            "shopfront", "products", "list", "--max-price", "12.345"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["shopfront", "categories", "--json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command, Command::Categories);
    }
}
