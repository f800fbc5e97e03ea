//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate holds the storefront's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (CLI / web)                         │   │
//! │  │    Product list ──► Detail ──► My Cart ──► Checkout             │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼───────────────┐  ┌───────────▼──────────────────┐    │
//! │  │  shopfront-store (CartStore) │  │  shopfront-api (REST client) │    │
//! │  └──────────────┬───────────────┘  └───────────┬──────────────────┘    │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────────────────▼───────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Query    │  │  (cents)  │  │ Selection │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, ProductDraft, ProductQuery)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines, the cart state machine and selections
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Cart, CartLine, Money, ProductId, Selection};
//!
//! let mut cart = Cart::new();
//! cart.add(CartLine::new(ProductId::new(1), "Mug", Money::from_major_minor(10, 0), 2));
//! cart.add(CartLine::new(ProductId::new(1), "Mug", Money::from_major_minor(10, 0), 3));
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total_quantity(), 5);
//!
//! let selected = Selection::from_ids([1]);
//! assert_eq!(cart.total_for_selection(&selected).cents(), 5000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{decremented, incremented, Cart, CartLine, Selection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Number of products requested per catalog page.
///
/// The catalog treats a short page (fewer than this many products) as the
/// last page.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Largest page size the catalog accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Quiet period before a search term is sent to the catalog.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
