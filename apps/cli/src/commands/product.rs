//! # Product Commands
//!
//! Catalog browsing and admin CRUD.
//!
//! ## Search Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products list                                                         │
//! │      │  ProductQuery { offset 0, limit 15, filters }                   │
//! │      ▼                                                                  │
//! │  page 1 ── 15 results ──► next_page() ──► page 2 ── 4 results ──► done │
//! │                                                                         │
//! │  products search                                                       │
//! │      stdin lines ──► watch channel ──► Debouncer (500 ms) ──► list     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use shopfront_api::CatalogClient;
use shopfront_core::{Category, CategoryId, Money, Product, ProductDraft, ProductId, ProductQuery};

use crate::context::App;
use crate::error::{CliError, CliResult};
use crate::output::{report_error, Render};

/// `shopfront products ...`
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProductCommand {
    /// List products, optionally filtered
    List {
        #[command(flatten)]
        filters: Filters,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Search as you type: one query per stdin line, debounced
    Search {
        #[command(flatten)]
        filters: Filters,
    },

    /// Show one product
    Show { id: u32 },

    /// Create a product
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: Money,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: u32,
        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
        /// Local image to upload first (repeatable)
        #[arg(long = "upload")]
        uploads: Vec<PathBuf>,
    },

    /// Change fields of an existing product
    Update {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<Money>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<u32>,
        /// Replace all images (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
    },

    /// Delete a product
    Delete { id: u32 },

    /// Upload an image and print its URL
    Upload { path: PathBuf },
}

/// Filters shared by `list` and `search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct Filters {
    /// Title contains
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub min_price: Option<Money>,

    #[arg(long)]
    pub max_price: Option<Money>,

    #[arg(long)]
    pub category: Option<u32>,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,
}

impl Filters {
    /// First-page query for these filters.
    pub fn to_query(&self, default_limit: u32) -> ProductQuery {
        let query = ProductQuery::new()
            .with_limit(self.limit.unwrap_or(default_limit))
            .with_price_range(self.min_price, self.max_price)
            .with_category(self.category.map(CategoryId));

        match &self.title {
            Some(title) => query.with_title(title.as_str()),
            None => query,
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Products loaded by `list` or one `search` round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,

    /// Offset of the next page, if the last page was full.
    pub next_offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ProductDetail(pub Product);

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CategoryList(pub Vec<Category>);

#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    pub id: ProductId,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Uploaded {
    pub location: String,
}

// =============================================================================
// Execution
// =============================================================================

pub async fn run(command: ProductCommand, app: &App) -> CliResult<()> {
    let catalog = app.catalog()?;
    let output = app.output();
    let page_size = app.config().page_size;

    match command {
        ProductCommand::List { filters, pages } => {
            let page = load_pages(&catalog, filters.to_query(page_size), pages).await?;
            output.emit(&page)
        }
        ProductCommand::Search { filters } => search(app, &catalog, filters.to_query(page_size)).await,
        ProductCommand::Show { id } => {
            let product = fetch_product(&catalog, ProductId::new(id)).await?;
            output.emit(&ProductDetail(product))
        }
        ProductCommand::Create {
            title,
            price,
            description,
            category,
            mut images,
            uploads,
        } => {
            for path in uploads {
                images.push(upload_file(&catalog, &path).await?);
            }
            let draft = ProductDraft {
                title,
                price,
                description,
                category_id: CategoryId(category),
                images,
            };
            let product = catalog.create_product(&draft).await?;
            output.emit(&ProductDetail(product))
        }
        ProductCommand::Update {
            id,
            title,
            price,
            description,
            category,
            images,
        } => {
            let id = ProductId::new(id);
            let current = fetch_product(&catalog, id).await?;

            let mut draft = ProductDraft::from(&current);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(price) = price {
                draft.price = price;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(category) = category {
                draft.category_id = CategoryId(category);
            }
            if !images.is_empty() {
                draft.images = images;
            }

            let product = catalog.update_product(id, &draft).await?;
            output.emit(&ProductDetail(product))
        }
        ProductCommand::Delete { id } => {
            let id = ProductId::new(id);
            let deleted = catalog.delete_product(id).await.map_err(|e| not_found(e, id))?;
            output.emit(&Deleted { id, deleted })
        }
        ProductCommand::Upload { path } => {
            let location = upload_file(&catalog, &path).await?;
            output.emit(&Uploaded { location })
        }
    }
}

pub async fn list_categories(app: &App) -> CliResult<()> {
    let categories = app.catalog()?.list_categories().await?;
    app.output().emit(&CategoryList(categories))
}

/// Fetches one product, reporting a 404 with its id.
pub(crate) async fn fetch_product(catalog: &CatalogClient, id: ProductId) -> CliResult<Product> {
    catalog.get_product(id).await.map_err(|e| not_found(e, id))
}

fn not_found(err: shopfront_api::ApiError, id: ProductId) -> CliError {
    if err.is_not_found() {
        CliError::not_found("Product", &id.to_string())
    } else {
        err.into()
    }
}

/// Loads up to `max_pages` pages, stopping early at a short page.
async fn load_pages(
    catalog: &CatalogClient,
    first: ProductQuery,
    max_pages: u32,
) -> CliResult<ProductPage> {
    if max_pages == 0 {
        return Err(CliError::validation("pages must be at least 1"));
    }

    let mut query = first;
    let mut products = Vec::new();
    let mut pages_loaded = 0;

    let next_offset = loop {
        let page = catalog.list_products(&query).await?;
        pages_loaded += 1;
        let returned = page.len();
        products.extend(page);

        match query.next_page(returned, pages_loaded) {
            Some(next) if pages_loaded < max_pages => query = next,
            next => break next.map(|q| q.offset),
        }
    };

    debug!(pages_loaded, total = products.len(), "Product pages loaded");
    Ok(ProductPage {
        products,
        next_offset,
    })
}

/// Reads queries from stdin and runs one search per settled query.
async fn search(app: &App, catalog: &CatalogClient, base: ProductQuery) -> CliResult<()> {
    let debouncer = app.config().debouncer()?;
    let (tx, mut rx) = watch::channel(String::new());

    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    eprintln!("Type a title to search, one per line. Ctrl-D to quit.");

    while let Some(text) = debouncer.settle(&mut rx).await {
        let query = base.clone().with_title(text.as_str());
        match catalog.list_products(&query).await {
            Ok(products) => {
                let next_offset = query.next_page(products.len(), 1).map(|q| q.offset);
                app.output().emit(&ProductPage {
                    products,
                    next_offset,
                })?;
            }
            Err(e) => {
                warn!(query = %text, error = %e, "Search failed");
                report_error(&CliError::from(e), app.output().is_json());
            }
        }
    }

    Ok(())
}

async fn upload_file(catalog: &CatalogClient, path: &Path) -> CliResult<String> {
    let bytes = tokio::task::spawn_blocking({
        let path = path.to_path_buf();
        move || std::fs::read(path)
    })
    .await
    .map_err(|e| CliError::internal(e.to_string()))?
    .map_err(|e| CliError::validation(format!("{}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::validation(format!("{}: not a file name", path.display())))?;

    Ok(catalog.upload_image(file_name, bytes).await?)
}

// =============================================================================
// Rendering
// =============================================================================

fn summary_line(product: &Product) -> String {
    format!(
        "#{:<5} {:<40} {:>10}  [{}]",
        product.id,
        product.title,
        product.price.to_string(),
        product.category.name
    )
}

impl Render for ProductPage {
    fn render(&self) -> String {
        if self.products.is_empty() {
            return "No products found".to_string();
        }

        let mut out: Vec<String> = self.products.iter().map(summary_line).collect();
        if let Some(offset) = self.next_offset {
            out.push(format!("… more results from offset {offset}"));
        }
        out.join("\n")
    }
}

impl Render for ProductDetail {
    fn render(&self) -> String {
        let product = &self.0;
        let mut out = vec![
            format!("#{} {}", product.id, product.title),
            format!("Price:    {}", product.price),
            format!("Category: {} (#{})", product.category.name, product.category.id),
        ];
        if !product.description.is_empty() {
            out.push(String::new());
            out.push(product.description.clone());
        }
        if !product.images.is_empty() {
            out.push(String::new());
            out.push("Images:".to_string());
            out.extend(product.images.iter().map(|url| format!("  {url}")));
        }
        out.join("\n")
    }
}

impl Render for CategoryList {
    fn render(&self) -> String {
        if self.0.is_empty() {
            return "No categories".to_string();
        }
        self.0
            .iter()
            .map(|category| format!("#{:<5} {}", category.id, category.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for Deleted {
    fn render(&self) -> String {
        if self.deleted {
            format!("Deleted product #{}", self.id)
        } else {
            format!("Product #{} was not deleted", self.id)
        }
    }
}

impl Render for Uploaded {
    fn render(&self) -> String {
        self.location.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_str(
            r#"{
                "id": 4,
                "title": "Handmade Fresh Table",
                "price": 687,
                "description": "Solid wood",
                "images": ["https://placehold.co/600x400"],
                "category": { "id": 5, "name": "Others" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filters_to_query() {
        let filters = Filters {
            title: Some("  table ".to_string()),
            min_price: Some(Money::from_cents(1000)),
            max_price: None,
            category: Some(5),
            limit: None,
        };
        let query = filters.to_query(15);

        assert_eq!(query.title.as_deref(), Some("table"));
        assert_eq!(query.limit, 15);
        assert_eq!(query.offset, 0);
        assert_eq!(query.price_min, Some(Money::from_cents(1000)));
        assert_eq!(query.category_id, Some(CategoryId(5)));

        let blank = Filters {
            title: Some("   ".to_string()),
            limit: Some(30),
            ..Filters::default()
        };
        let query = blank.to_query(15);
        assert!(query.title.is_none());
        assert_eq!(query.limit, 30);
    }

    #[test]
    fn test_render_page() {
        let page = ProductPage {
            products: vec![product()],
            next_offset: Some(15),
        };
        let text = page.render();
        assert!(text.contains("Handmade Fresh Table"));
        assert!(text.contains("$687.00"));
        assert!(text.contains("[Others]"));
        assert!(text.ends_with("more results from offset 15"));

        let empty = ProductPage {
            products: vec![],
            next_offset: None,
        };
        assert_eq!(empty.render(), "No products found");
    }

    #[test]
    fn test_render_detail() {
        let text = ProductDetail(product()).render();
        assert!(text.starts_with("#4 Handmade Fresh Table"));
        assert!(text.contains("Category: Others (#5)"));
        assert!(text.contains("  https://placehold.co/600x400"));
    }

    #[test]
    fn test_render_deleted() {
        let deleted = Deleted {
            id: ProductId::new(4),
            deleted: true,
        };
        assert_eq!(deleted.render(), "Deleted product #4");
    }
}
