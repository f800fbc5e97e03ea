//! # shopfront-api: Catalog REST Client for Shopfront
//!
//! Async access to the product catalog: paged product search, product
//! detail, admin CRUD, image upload and categories. Also home to the
//! [`Debouncer`] that throttles search-as-you-type.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI (products list / search)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────┐    │
//! │  │  Debouncer (debounce.rs)     │─────►│ CatalogClient (client.rs)│    │
//! │  │  watch::Receiver<String>     │      │ reqwest + JSON           │    │
//! │  └──────────────────────────────┘      └────────────┬─────────────┘    │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                        https://api.escuelajs.co/api/v1 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate never touches the cart.

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;

pub use client::CatalogClient;
pub use config::{ApiConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use debounce::Debouncer;
pub use error::{ApiError, ApiResult};
