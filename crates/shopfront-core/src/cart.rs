//! # Cart
//!
//! The shopping cart as a pure value: lines, merge rules, partial checkout
//! and selection totals. Persistence lives in `shopfront-store`.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              Operation                  Cart Change          │
//! │  ─────────              ─────────                  ───────────          │
//! │                                                                         │
//! │  "Add to cart" ───────► add(line) ───────────────► merge or push       │
//! │                                                                         │
//! │  + / − buttons ───────► update_quantity(id, n) ──► lines[i].qty = n    │
//! │                         (n from incremented /                           │
//! │                          decremented)                                   │
//! │                                                                         │
//! │  Trash icon ──────────► remove(id) ──────────────► drop line           │
//! │                                                                         │
//! │  "Checkout" ──────────► checkout(&selection) ────► drop selected       │
//! │                                                                         │
//! │  Selected total ──────► total_for_selection() ───► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share an `id` (adding an existing id merges).
//! - Lines keep first-add order; removing then re-adding moves a line to
//!   the end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
///
/// `title` and `price` are frozen at the time the product was first added;
/// later adds of the same id only grow the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,

    /// Display name, not validated here.
    pub title: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Quantity in cart. At least 1 on the add path; `update_quantity`
    /// stores whatever the caller passes.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl CartLine {
    pub fn new(id: ProductId, title: impl Into<String>, price: Money, quantity: i64) -> Self {
        CartLine {
            id,
            title: title.into(),
            price,
            quantity,
        }
    }

    /// Creates a cart line from a catalog product.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine::new(product.id, product.title.clone(), product.price, quantity)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quantity Helpers
// =============================================================================

/// Quantity after pressing "+".
#[inline]
pub fn incremented(quantity: i64) -> i64 {
    quantity.saturating_add(1)
}

/// Quantity after pressing "−". Never goes below 1 through this path.
///
/// `Cart::update_quantity` itself does not clamp; the floor belongs to
/// this helper only.
#[inline]
pub fn decremented(quantity: i64) -> i64 {
    quantity.saturating_sub(1).max(1)
}

// =============================================================================
// Selection
// =============================================================================

/// A caller-chosen set of cart line ids (the ticked checkboxes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(BTreeSet<ProductId>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from raw catalog ids.
    pub fn from_ids<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        Selection(ids.into_iter().map(ProductId::new).collect())
    }

    /// Flips the checkbox for `id`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: ProductId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: ProductId) -> bool {
        self.0.remove(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }

    /// Drops ids that are no longer in the cart (e.g. after a removal).
    pub fn retain_present(&mut self, cart: &Cart) {
        self.0.retain(|id| cart.contains(*id));
    }
}

impl FromIterator<ProductId> for Selection {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Selection(iter.into_iter().collect())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered sequence of lines with unique ids.
///
/// Serializes as a plain JSON array of lines. Has no `Deserialize`: build a
/// cart from decoded lines with [`Cart::from_lines`] so duplicates merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart by adding each line in order, merging repeated ids.
    pub fn from_lines<I: IntoIterator<Item = CartLine>>(lines: I) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            cart.add(line);
        }
        cart
    }

    /// Adds a line or grows the quantity of the existing line with that id.
    ///
    /// ## Behavior
    /// - Id already in cart: `quantity += line.quantity`; the existing
    ///   title and price are kept (first-seen wins)
    /// - Id not in cart: appended at the end
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self.get_mut(line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            return;
        }

        self.lines.push(line);
    }

    /// Removes the line with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != initial_len
    }

    /// Sets the quantity of the line with `id` verbatim, zero and negative
    /// values included. Returns `false` if there was no such line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        match self.get_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Removes every selected line, keeping the order of the rest.
    /// Returns how many lines were removed.
    ///
    /// Selected ids that are not in the cart are ignored.
    pub fn checkout(&mut self, selected: &Selection) -> usize {
        let initial_len = self.lines.len();
        self.lines.retain(|line| !selected.contains(line.id));
        initial_len - self.lines.len()
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price × quantity` over the selected lines.
    pub fn total_for_selection(&self, selected: &Selection) -> Money {
        self.lines
            .iter()
            .filter(|line| selected.contains(line.id))
            .map(CartLine::line_total)
            .sum()
    }

    /// Number of distinct lines (the cart badge).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities, saturating at the `i64` bounds.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
