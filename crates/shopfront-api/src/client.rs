//! # Catalog Client
//!
//! Async client for the product/category REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                  Client call                              │
//! │  ──────  ────                  ───────────                              │
//! │  GET     /products?...         list_products(&ProductQuery)             │
//! │  GET     /products/{id}        get_product(id)                          │
//! │  POST    /products             create_product(&ProductDraft)            │
//! │  PUT     /products/{id}        update_product(id, &ProductDraft)        │
//! │  DELETE  /products/{id}        delete_product(id) -> bool               │
//! │  POST    /files/upload         upload_image(name, bytes) -> location    │
//! │  GET     /categories           list_categories()                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries and drafts are validated locally before anything is sent. Every
//! non-2xx answer becomes [`ApiError::Status`] with the raw body. There is no
//! retry.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use shopfront_core::{Category, Product, ProductDraft, ProductId, ProductQuery};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Body of a successful `POST /files/upload`.
#[derive(Debug, Deserialize)]
struct UploadedFile {
    location: String,
}

/// Catalog API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: ApiConfig,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(CatalogClient { http, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// One page of products matching `query`.
    pub async fn list_products(&self, query: &ProductQuery) -> ApiResult<Vec<Product>> {
        query.validate()?;

        let request = self
            .request(Method::GET, &["products"])?
            .query(&query.to_params());
        let products: Vec<Product> = self.execute(request).await?;

        debug!(
            offset = query.offset,
            limit = query.limit,
            returned = products.len(),
            "Listed products"
        );
        Ok(products)
    }

    pub async fn get_product(&self, id: ProductId) -> ApiResult<Product> {
        let request = self.request(Method::GET, &["products", &id.to_string()])?;
        self.execute(request).await
    }

    /// Creates a product and returns it as stored by the catalog.
    pub async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        draft.validate()?;

        let request = self.request(Method::POST, &["products"])?.json(draft);
        let product: Product = self.execute(request).await?;

        info!(id = %product.id, title = %product.title, "Product created");
        Ok(product)
    }

    /// Replaces a product's editable fields.
    pub async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> ApiResult<Product> {
        draft.validate()?;

        let request = self
            .request(Method::PUT, &["products", &id.to_string()])?
            .json(draft);
        let product: Product = self.execute(request).await?;

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. The catalog answers with a bare boolean.
    pub async fn delete_product(&self, id: ProductId) -> ApiResult<bool> {
        let request = self.request(Method::DELETE, &["products", &id.to_string()])?;
        let deleted: bool = self.execute(request).await?;

        info!(id = %id, deleted, "Product delete requested");
        Ok(deleted)
    }

    /// Uploads an image and returns the URL to store in `images`.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let size = bytes.len();
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let request = self
            .request(Method::POST, &["files", "upload"])?
            .multipart(form);
        let uploaded: UploadedFile = self.execute(request).await?;

        info!(file_name, size, location = %uploaded.location, "Image uploaded");
        Ok(uploaded.location)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let request = self.request(Method::GET, &["categories"])?;
        self.execute(request).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// `base_url` with `segments` appended as path segments.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidUrl(format!("{} cannot be a base", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Catalog request");
        Ok(self.http.request(method, url))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(format!("Cannot connect to {}", self.config.base_url))
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
