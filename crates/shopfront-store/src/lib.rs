//! # shopfront-store: Cart Persistence for Shopfront
//!
//! This crate keeps the cart alive across restarts. It is synchronous:
//! every mutation has written its snapshot before it returns.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  CLI command (cart add 3)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopfront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │   snapshot    │    │   storage    │  │   │
//! │  │   │               │───►│ encode/decode │───►│ FileStorage  │  │   │
//! │  │   │ LoadStatus    │    │ JSON lines    │    │ MemoryStorage│  │   │
//! │  │   │ SaveStatus    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/cart.json                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart_store`] - `CartStore` and its load/save status
//! - [`storage`] - `KeyValueStorage` trait and backends
//! - [`snapshot`] - Cart snapshot codec
//! - [`config`] - Store configuration
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use shopfront_core::{CartLine, Money, ProductId, Selection};
//! use shopfront_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::open(MemoryStorage::new(), "cart");
//! store.add_to_cart(CartLine::new(ProductId::new(1), "Mug", Money::from_cents(1000), 2));
//!
//! let total = store.total_for_selection(&Selection::from_ids([1]));
//! assert_eq!(total.cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, LoadStatus, SaveStatus};
pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
