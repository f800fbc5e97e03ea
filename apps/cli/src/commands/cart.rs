//! # Cart Commands
//!
//! Subcommands that read or change the persistent cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  cart add   ┌──────────┐  cart checkout <ids>            │
//! │  │  Empty   │────────────►│ In Cart  │──────────────────┐              │
//! │  │  Cart    │◄────────────│          │◄─────────────────┘              │
//! │  └──────────┘  cart clear └──────────┘  (unselected lines stay)        │
//! │                                │                                        │
//! │                   remove / set-qty / inc / dec                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command prints the cart as it is after the command ran.

use clap::Subcommand;
use serde::Serialize;

use shopfront_core::validation::validate_quantity;
use shopfront_core::{CartLine, Money, ProductId, Selection};
use shopfront_store::{CartStore, KeyValueStorage, SaveStatus};

use crate::commands::product::fetch_product;
use crate::context::App;
use crate::error::{CliError, CliResult};
use crate::output::Render;

/// `shopfront cart ...`
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,

    /// Add a catalog product (merges with an existing line)
    Add {
        id: u32,
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },

    /// Remove a line
    Remove { id: u32 },

    /// Set a line's quantity exactly as given
    SetQty {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Quantity + 1
    Inc { id: u32 },

    /// Quantity - 1, never below 1
    Dec { id: u32 },

    /// Remove the selected lines and print what they cost
    Checkout {
        #[arg(required_unless_present = "all")]
        ids: Vec<u32>,
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },

    /// Total for the selected lines
    Total {
        ids: Vec<u32>,
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },

    /// Empty the cart
    Clear,
}

/// A resolved cart operation, ready to apply without I/O beyond the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Show,
    Add(CartLine),
    Remove(ProductId),
    SetQuantity(ProductId, i64),
    Increment(ProductId),
    Decrement(ProductId),
    Checkout(Selection),
    Total(Selection),
    Clear,
}

/// The cart after an action, plus what the action reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartReport {
    pub lines: Vec<CartLine>,
    pub line_count: usize,
    pub total_quantity: i64,

    /// Total of the selection for `total` and `checkout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_total: Option<Money>,

    /// Lines removed by `checkout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_out: Option<usize>,

    pub last_save: SaveStatus,
}

// =============================================================================
// Execution
// =============================================================================

pub async fn run(command: CartCommand, app: &App) -> CliResult<()> {
    let mut store = app.cart_store()?;

    let action = match command {
        CartCommand::Add { id, quantity } => {
            validate_quantity(quantity)?;
            let catalog = app.catalog()?;
            let product = fetch_product(&catalog, ProductId::new(id)).await?;
            CartAction::Add(CartLine::from_product(&product, quantity))
        }
        other => resolve(other, &store)?,
    };

    let report = apply(&mut store, action);
    app.output().emit(&report)
}

/// Turns a command that needs no catalog lookup into an action.
pub fn resolve<S: KeyValueStorage>(
    command: CartCommand,
    store: &CartStore<S>,
) -> CliResult<CartAction> {
    let all_lines = || -> Selection { store.lines().iter().map(|line| line.id).collect() };

    Ok(match command {
        CartCommand::Show => CartAction::Show,
        CartCommand::Add { .. } => {
            return Err(CliError::internal("cart add needs a catalog lookup"));
        }
        CartCommand::Remove { id } => CartAction::Remove(ProductId::new(id)),
        CartCommand::SetQty { id, quantity } => CartAction::SetQuantity(ProductId::new(id), quantity),
        CartCommand::Inc { id } => CartAction::Increment(ProductId::new(id)),
        CartCommand::Dec { id } => CartAction::Decrement(ProductId::new(id)),
        CartCommand::Checkout { ids, all } => {
            CartAction::Checkout(if all { all_lines() } else { Selection::from_ids(ids) })
        }
        CartCommand::Total { ids, all } => {
            CartAction::Total(if all { all_lines() } else { Selection::from_ids(ids) })
        }
        CartCommand::Clear => CartAction::Clear,
    })
}

/// Applies `action` to the store and reports the resulting cart.
pub fn apply<S: KeyValueStorage>(store: &mut CartStore<S>, action: CartAction) -> CartReport {
    let mut selection_total = None;
    let mut checked_out = None;

    match action {
        CartAction::Show => {}
        CartAction::Add(line) => {
            store.add_to_cart(line);
        }
        CartAction::Remove(id) => {
            store.remove_item(id);
        }
        CartAction::SetQuantity(id, quantity) => {
            store.update_quantity(id, quantity);
        }
        CartAction::Increment(id) => {
            store.increment(id);
        }
        CartAction::Decrement(id) => {
            store.decrement(id);
        }
        CartAction::Checkout(selection) => {
            selection_total = Some(store.total_for_selection(&selection));
            let before = store.line_count();
            store.checkout(&selection);
            checked_out = Some(before - store.line_count());
        }
        CartAction::Total(selection) => {
            selection_total = Some(store.total_for_selection(&selection));
        }
        CartAction::Clear => {
            store.clear_cart();
        }
    }

    CartReport {
        lines: store.lines().to_vec(),
        line_count: store.line_count(),
        total_quantity: store.total_quantity(),
        selection_total,
        checked_out,
        last_save: store.last_save().clone(),
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl Render for CartReport {
    fn render(&self) -> String {
        let mut out = Vec::new();

        if let Some(count) = self.checked_out {
            let total = self.selection_total.unwrap_or_default();
            out.push(format!("Checked out {count} line(s) for {total}"));
        } else if let Some(total) = self.selection_total {
            out.push(format!("Selected total: {total}"));
        }

        if self.lines.is_empty() {
            out.push("Cart is empty".to_string());
        } else {
            out.push(format!(
                "Cart ({} lines, {} items)",
                self.line_count, self.total_quantity
            ));
            for line in &self.lines {
                out.push(format!(
                    "  #{:<5} {:<32} {:>4} × {:>10} = {:>10}",
                    line.id,
                    line.title,
                    line.quantity,
                    line.price.to_string(),
                    line.line_total().to_string()
                ));
            }
        }

        if let SaveStatus::Failed { reason } = &self.last_save {
            out.push(format!("warning: cart was not saved ({reason})"));
        }

        out.join("\n")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_store::MemoryStorage;

    fn store_with(lines: &[(u32, i64, i64)]) -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new(), "cart");
        for &(id, price_major, quantity) in lines {
            store.add_to_cart(CartLine::new(
                ProductId::new(id),
                format!("Product {id}"),
                Money::from_major_minor(price_major, 0),
                quantity,
            ));
        }
        store
    }

    #[test]
    fn test_total_reports_selection() {
        let mut store = store_with(&[(1, 10, 2), (2, 5, 1)]);
        let action = resolve(CartCommand::Total { ids: vec![1, 2], all: false }, &store).unwrap();

        let report = apply(&mut store, action);
        assert_eq!(report.selection_total, Some(Money::from_cents(2500)));
        assert_eq!(report.line_count, 2);
        assert_eq!(report.last_save, SaveStatus::Saved);
    }

    #[test]
    fn test_checkout_all() {
        let mut store = store_with(&[(1, 10, 2), (2, 5, 1)]);
        let action = resolve(CartCommand::Checkout { ids: vec![], all: true }, &store).unwrap();

        let report = apply(&mut store, action);
        assert_eq!(report.checked_out, Some(2));
        assert_eq!(report.selection_total, Some(Money::from_cents(2500)));
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_checkout_keeps_unselected() {
        let mut store = store_with(&[(1, 10, 1), (2, 5, 1)]);
        let report = apply(&mut store, CartAction::Checkout(Selection::from_ids([1])));

        assert_eq!(report.checked_out, Some(1));
        assert_eq!(report.lines[0].id, ProductId::new(2));
    }

    #[test]
    fn test_set_qty_is_verbatim_and_dec_floors() {
        let mut store = store_with(&[(1, 10, 3)]);

        let report = apply(&mut store, CartAction::SetQuantity(ProductId::new(1), 0));
        assert_eq!(report.lines[0].quantity, 0);

        apply(&mut store, CartAction::SetQuantity(ProductId::new(1), 2));
        apply(&mut store, CartAction::Decrement(ProductId::new(1)));
        let report = apply(&mut store, CartAction::Decrement(ProductId::new(1)));
        assert_eq!(report.lines[0].quantity, 1);
    }

    #[test]
    fn test_max_quantity_keeps_reports_working() {
        let mut store = store_with(&[(1, 10, 1), (2, 5, 1)]);

        let report = apply(&mut store, CartAction::SetQuantity(ProductId::new(1), i64::MAX));
        assert_eq!(report.total_quantity, i64::MAX);
        assert_eq!(report.last_save, SaveStatus::Saved);

        let report = apply(&mut store, CartAction::Show);
        assert_eq!(report.total_quantity, i64::MAX);
        assert_eq!(report.line_count, 2);
        assert!(report.render().contains(&format!("Cart (2 lines, {} items)", i64::MAX)));
    }

    #[test]
    fn test_add_cannot_be_resolved_offline() {
        let store = store_with(&[]);
        assert!(resolve(CartCommand::Add { id: 1, quantity: 1 }, &store).is_err());
    }

    #[test]
    fn test_render() {
        let mut store = store_with(&[(1, 10, 2)]);
        let report = apply(&mut store, CartAction::Total(Selection::from_ids([1])));
        let text = report.render();

        assert!(text.starts_with("Selected total: $20.00"));
        assert!(text.contains("Cart (1 lines, 2 items)"));
        assert!(text.contains("Product 1"));

        let mut empty = store_with(&[]);
        assert_eq!(apply(&mut empty, CartAction::Show).render(), "Cart is empty");
    }

    #[test]
    fn test_report_json() {
        let mut store = store_with(&[(1, 10, 2)]);
        let report = apply(&mut store, CartAction::Show);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["lineCount"], 1);
        assert_eq!(json["lines"][0]["price"], 10);
        assert_eq!(json["lastSave"]["status"], "saved");
        assert!(json.get("selectionTotal").is_none());
    }
}
