//! # Catalog Types
//!
//! Types exchanged with the product/category REST API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │  ProductDraft   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │◄──│  category_id    │       │
//! │  │  title, price   │   │  name           │   │  title, price   │       │
//! │  │  images[]       │   │  image          │   │  images[]       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  ProductQuery: offset/limit paging + title, price range,    │       │
//! │  │  category filters for GET /products                         │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{self, ValidationResult};
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog identifier of a product. Also the key of a cart line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(pub u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog identifier of a category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        CategoryId(id)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Cover image URL, when the catalog has one.
    #[serde(default)]
    pub image: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub description: String,

    /// Image URLs, first one is the cover (detail carousel order).
    #[serde(default)]
    pub images: Vec<String>,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub creation_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Payload for creating or updating a product.
///
/// Field names follow the catalog's wire format (`categoryId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub title: String,
    #[ts(type = "number")]
    pub price: Money,
    pub description: String,
    pub category_id: CategoryId,
    pub images: Vec<String>,
}

impl ProductDraft {
    /// Checks the draft against the admin form rules.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_product_draft(self)
    }
}

/// Prefills an edit form from the current product.
impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            category_id: product.category.id,
            images: product.images.clone(),
        }
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Filters and paging for `GET /products`.
///
/// ## Infinite Scrolling
/// ```text
/// page 1: offset 0,  limit 15 ──► 15 products ──► next_page(15, 1) = offset 15
/// page 2: offset 15, limit 15 ──► 15 products ──► next_page(15, 2) = offset 30
/// page 3: offset 30, limit 15 ──►  4 products ──► next_page(4, 3)  = None
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub offset: u32,
    pub limit: u32,
    pub title: Option<String>,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
    pub category_id: Option<CategoryId>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            title: None,
            price_min: None,
            price_max: None,
            category_id: None,
        }
    }
}

impl ProductQuery {
    /// First page with the default page size and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title search. Blank input clears the filter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = title.trim();
        self.title = (!title.is_empty()).then(|| title.to_string());
        self
    }

    /// Sets the price range; either bound may be open.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the query for the page after `pages_loaded` pages, or `None`
    /// when the last page came back short.
    pub fn next_page(&self, last_page_len: usize, pages_loaded: u32) -> Option<ProductQuery> {
        if self.limit == 0 || last_page_len < self.limit as usize {
            return None;
        }

        let mut next = self.clone();
        next.offset = pages_loaded.checked_mul(self.limit)?;
        Some(next)
    }

    /// Checks page size, title length and price range.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_page_size(self.limit)?;
        if let Some(title) = &self.title {
            validation::validate_search_query(title)?;
        }
        validation::validate_price_range(self.price_min, self.price_max)
    }

    /// Query-string pairs in the catalog's naming; unset filters are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if let Some(title) = &self.title {
            params.push(("title", title.clone()));
        }
        if let Some(min) = self.price_min {
            params.push(("price_min", amount_param(min)));
        }
        if let Some(max) = self.price_max {
            params.push(("price_max", amount_param(max)));
        }
        if let Some(category_id) = self.category_id {
            params.push(("categoryId", category_id.to_string()));
        }

        params
    }
}

fn amount_param(amount: Money) -> String {
    if amount.cents_part() == 0 {
        amount.dollars().to_string()
    } else {
        format!("{}.{:02}", amount.dollars(), amount.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
