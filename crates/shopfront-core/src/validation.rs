//! # Validation Module
//!
//! Input validation utilities for Shopfront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI (form fields, CLI arguments)                              │
//! │  ├── Type checks (is it a number?)                                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product draft rules before create/update                          │
//! │  └── Search/filter rules before list queries                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog API                                                  │
//! │  └── Server-side checks (400 responses)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself validates nothing: `Cart::update_quantity` stores any
//! quantity it is given. [`validate_quantity`] is for callers that want to
//! reject bad input before it reaches the cart.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductDraft;
use crate::MAX_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5000;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product_title;
///
/// assert!(validate_product_title("Classic Red Jogger Sweatpants").is_ok());
/// assert!(validate_product_title("   ").is_err());
/// ```
pub fn validate_product_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a product description (required, at most 5000 characters).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (lists everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a product's image list.
///
/// ## Rules
/// - At least one image
/// - Every entry is an absolute `http(s)` URL (as returned by the upload
///   endpoint)
pub fn validate_images(images: &[String]) -> ValidationResult<()> {
    if images.is_empty() {
        return Err(ValidationError::Required {
            field: "images".to_string(),
        });
    }

    for image in images {
        let image = image.trim();
        if !(image.starts_with("https://") || image.starts_with("http://")) {
            return Err(ValidationError::InvalidFormat {
                field: "images".to_string(),
                reason: format!("'{image}' is not an http(s) URL"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed by the user.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a price filter; either bound may be open.
pub fn validate_price_range(min: Option<Money>, max: Option<Money>) -> ValidationResult<()> {
    if let Some(min) = min {
        validate_price(min)?;
    }
    if let Some(max) = max {
        validate_price(max)?;
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ValidationError::InvalidFormat {
                field: "price range".to_string(),
                reason: format!("minimum {min} is above maximum {max}"),
            });
        }
    }

    Ok(())
}

/// Validates a catalog page size (1 to 100).
pub fn validate_page_size(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: i64::from(MAX_PAGE_SIZE),
        });
    }

    Ok(())
}

/// Validates a debounce delay in milliseconds.
///
/// ## Returns
/// The delay as an unsigned value.
pub fn validate_delay_ms(delay_ms: i64) -> ValidationResult<u64> {
    u64::try_from(delay_ms).map_err(|_| ValidationError::MustNotBeNegative {
        field: "delay".to_string(),
    })
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a product draft the way the admin add/edit form does.
///
/// Returns the first failing field.
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_title(&draft.title)?;
    validate_price(draft.price)?;
    validate_description(&draft.description)?;
    validate_images(&draft.images)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryId;

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "Lamp".to_string(),
            price: Money::from_cents(1999),
            description: "Warm light".to_string(),
            category_id: CategoryId(1),
            images: vec!["https://i.imgur.com/lamp.jpeg".to_string()],
        }
    }

    #[test]
    fn test_validate_product_title() {
        assert!(validate_product_title("Lamp").is_ok());
        assert!(validate_product_title("").is_err());
        assert!(validate_product_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        let ten = Money::from_cents(1000);
        let twenty = Money::from_cents(2000);

        assert!(validate_price_range(None, None).is_ok());
        assert!(validate_price_range(Some(ten), None).is_ok());
        assert!(validate_price_range(Some(ten), Some(twenty)).is_ok());
        assert!(validate_price_range(Some(ten), Some(ten)).is_ok());
        assert!(validate_price_range(Some(twenty), Some(ten)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  shirt ").unwrap(), "shirt");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_delay_ms() {
        assert_eq!(validate_delay_ms(500).unwrap(), 500);
        assert_eq!(validate_delay_ms(0).unwrap(), 0);
        assert!(validate_delay_ms(-1).is_err());
    }

    #[test]
    fn test_validate_product_draft() {
        assert!(validate_product_draft(&draft()).is_ok());

        let mut untitled = draft();
        untitled.title = " ".to_string();
        assert_eq!(
            validate_product_draft(&untitled),
            Err(ValidationError::Required {
                field: "title".to_string()
            })
        );

        let mut no_images = draft();
        no_images.images.clear();
        assert!(validate_product_draft(&no_images).is_err());

        let mut relative = draft();
        relative.images = vec!["lamp.jpeg".to_string()];
        assert!(validate_product_draft(&relative).is_err());

        let mut no_description = draft();
        no_description.description.clear();
        assert!(validate_product_draft(&no_description).is_err());
    }
}
