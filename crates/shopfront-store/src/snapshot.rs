//! # Cart Snapshot Codec
//!
//! The persisted form of a cart is a JSON array of lines in cart order:
//!
//! ```json
//! [{"id":1,"title":"Mug","price":10.5,"quantity":2}]
//! ```
//!
//! Prices use the catalog's major-unit numbers. Decoding rebuilds the cart
//! through [`Cart::from_lines`], so a hand-edited snapshot with a repeated id
//! still loads as a single merged line.

use shopfront_core::{Cart, CartLine};

use crate::error::{StorageError, StorageResult};

/// Serializes the full cart.
pub fn encode(cart: &Cart) -> StorageResult<String> {
    Ok(serde_json::to_string(cart)?)
}

/// Parses a snapshot back into a cart.
pub fn decode(text: &str) -> StorageResult<Cart> {
    let lines: Vec<CartLine> =
        serde_json::from_str(text).map_err(|e| StorageError::InvalidSnapshot(e.to_string()))?;
    Ok(Cart::from_lines(lines))
}
