//! Order and product submission validators.
//!
//! Submissions arrive with every field optional so that a missing field is
//! reported as a validation message instead of a deserialization failure.
//! Validation is pure: it trims and normalizes input and either returns a
//! value ready for persistence or the first problem found.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Email, EmailError, Price};

/// Image used for products created without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// Reasons a submission is rejected. The `Display` text is sent to clients.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("At least one product is required")]
    NoProducts,
    /// A line item is missing its product reference or has a bad quantity.
    #[error("Invalid product data")]
    InvalidProductData,
    #[error("Name and description are required")]
    NameAndDescriptionRequired,
    #[error("Category is required")]
    CategoryRequired,
}

impl From<EmailError> for ValidationError {
    fn from(_: EmailError) -> Self {
        Self::InvalidEmail
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Raw order submission from the storefront.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub customer_name: Option<String>,
    pub store_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Kept as raw JSON so malformed items surface as `InvalidProductData`.
    pub products: Option<Value>,
}

/// Customer details carried by an order, trimmed and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub email: Email,
}

/// One product line on an order.
///
/// The product name is a snapshot taken at order time and is not kept in sync
/// with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
}

/// An order that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub contact: CustomerContact,
    pub items: Vec<LineItem>,
}

impl OrderSubmission {
    /// Validate the submission.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// required contact fields, presence of `products`, email shape, a
    /// non-empty product list, then each line item.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<ValidatedOrder, ValidationError> {
        let name = required(self.customer_name.as_deref(), "customerName")?;
        let store_name = required(self.store_name.as_deref(), "storeName")?;
        let address = required(self.address.as_deref(), "address")?;
        let phone = required(self.phone.as_deref(), "phone")?;
        let email = required(self.email.as_deref(), "email")?;

        let products = match &self.products {
            None | Some(Value::Null) => return Err(ValidationError::Required("products")),
            Some(products) => products,
        };

        let email = Email::parse(&email)?;

        let raw_items = match products {
            Value::Array(items) if !items.is_empty() => items,
            _ => return Err(ValidationError::NoProducts),
        };

        let items = raw_items
            .iter()
            .map(parse_line_item)
            .collect::<Option<Vec<_>>>()
            .ok_or(ValidationError::InvalidProductData)?;

        Ok(ValidatedOrder {
            contact: CustomerContact {
                name,
                store_name,
                address,
                phone,
                email,
            },
            items,
        })
    }
}

/// Parse a single line item, returning `None` if any field is unusable.
///
/// Items with a blank product reference or a quantity below one are treated
/// the same as malformed JSON.
#[must_use]
pub fn parse_line_item(raw: &Value) -> Option<LineItem> {
    let product_id = non_blank(raw.get("productId")?.as_str()?)?;
    let product_name = non_blank(raw.get("productName")?.as_str()?)?;
    let quantity = parse_quantity(raw.get("quantity")?)?;

    Some(LineItem {
        product_id,
        product_name,
        quantity,
    })
}

/// Accepts a JSON integer or a numeric string, returning it if at least one.
fn parse_quantity(value: &Value) -> Option<u32> {
    let quantity = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(quantity).ok().filter(|q| *q >= 1)
}

// =============================================================================
// Products
// =============================================================================

/// Raw product submission from the admin back office or a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    /// Number or string; anything unusable leaves the price unspecified.
    pub price: Option<Value>,
    pub stock_quantity: Option<Value>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub usage_instructions: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub specifications: Option<Specifications>,
    pub is_active: Option<bool>,
}

/// Fixed-shape product specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specifications {
    pub size: Option<String>,
    pub weight: Option<String>,
    pub fragrance: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Specifications {
    fn normalized(self) -> Self {
        let clean = |v: Option<String>| v.as_deref().and_then(non_blank);
        Self {
            size: clean(self.size),
            weight: clean(self.weight),
            fragrance: clean(self.fragrance),
            kind: clean(self.kind),
        }
    }
}

/// A product that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: Option<Price>,
    pub stock_quantity: Option<i32>,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub usage_instructions: Vec<String>,
    pub warnings: Vec<String>,
    pub tags: Vec<String>,
    pub specifications: Specifications,
    pub is_active: bool,
}

impl ProductSubmission {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameAndDescriptionRequired`] or
    /// [`ValidationError::CategoryRequired`].
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let (Some(name), Some(description)) = (
            self.name.as_deref().and_then(non_blank),
            self.description.as_deref().and_then(non_blank),
        ) else {
            return Err(ValidationError::NameAndDescriptionRequired);
        };
        let category = self
            .category
            .as_deref()
            .and_then(non_blank)
            .ok_or(ValidationError::CategoryRequired)?;

        Ok(NewProduct {
            name,
            description,
            image: self
                .image
                .as_deref()
                .and_then(non_blank)
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            category,
            price: self.price.as_ref().and_then(parse_price),
            stock_quantity: self.stock_quantity.as_ref().and_then(parse_stock),
            features: clean_list(self.features),
            benefits: clean_list(self.benefits),
            usage_instructions: clean_list(self.usage_instructions),
            warnings: clean_list(self.warnings),
            tags: clean_list(self.tags),
            specifications: self.specifications.unwrap_or_default().normalized(),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

fn parse_price(value: &Value) -> Option<Price> {
    match value {
        Value::Number(n) => Price::parse_lenient(&n.to_string()),
        Value::String(s) => Price::parse_lenient(s),
        _ => None,
    }
}

/// Whole units in stock. Fractional input is truncated.
fn parse_stock(value: &Value) -> Option<i32> {
    let stock = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(truncate))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate))?
        }
        _ => return None,
    };
    i32::try_from(stock).ok().filter(|s| *s >= 0)
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        -1
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    value
        .and_then(non_blank)
        .ok_or(ValidationError::Required(field))
}

/// Trim every entry and drop the blank ones, keeping order.
#[must_use]
pub fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_blank(&v))
        .collect()
}
