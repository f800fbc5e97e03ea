//! # Composition Root
//!
//! Builds the long-lived pieces a command needs from [`AppConfig`].
//!
//! ```text
//! AppConfig ──► App ──┬── cart_store() ──► CartStore<FileStorage>  (<data dir>/cart.json)
//!                     └── catalog()    ──► CatalogClient           (api_url)
//! ```
//!
//! Both are built on demand so `cart show` never needs the network and
//! `products list` never touches the data directory.

use tracing::debug;

use shopfront_api::CatalogClient;
use shopfront_store::{CartStore, FileStorage};

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::Output;

/// Shared context for one CLI invocation.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    output: Output,
}

impl App {
    pub fn new(config: AppConfig, output: Output) -> Self {
        App { config, output }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Opens the persistent cart. A corrupt snapshot opens as an empty cart.
    pub fn cart_store(&self) -> CliResult<CartStore<FileStorage>> {
        let store_config = self.config.store_config()?;
        debug!(path = %store_config.snapshot_path().display(), "Opening cart");
        Ok(CartStore::open_file(&store_config)?)
    }

    pub fn catalog(&self) -> CliResult<CatalogClient> {
        Ok(CatalogClient::new(self.config.api_config()?)?)
    }
}
