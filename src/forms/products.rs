use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a category label.
const CATEGORY_MAX_LEN: usize = 64;
const CATEGORY_MAX_LEN_VALIDATOR: u64 = CATEGORY_MAX_LEN as u64;

/// Maximum allowed length for a distribution center name.
const DISTRIBUTION_CENTER_MAX_LEN: usize = 128;
const DISTRIBUTION_CENTER_MAX_LEN_VALIDATOR: u64 = DISTRIBUTION_CENTER_MAX_LEN as u64;

/// Brazilian postal codes carry eight digits.
const POSTAL_CODE_LEN: usize = 8;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product requests.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required text field is empty after sanitization.
    #[error("`{field}` cannot be empty")]
    EmptyField { field: &'static str },
    /// The product identifier is not a UUID.
    #[error("invalid product id `{value}`")]
    InvalidId { value: String },
    /// The postal code does not contain exactly eight digits.
    #[error("invalid postal code `{value}`")]
    InvalidPostalCode { value: String },
    /// The state is not a two-letter abbreviation.
    #[error("invalid state `{value}`")]
    InvalidState { value: String },
}

/// JSON body accepted when registering a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Price in the smallest currency unit.
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(min = 1, max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: String,
    #[validate(length(min = 1, max = DISTRIBUTION_CENTER_MAX_LEN_VALIDATOR))]
    pub distribution_center: String,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = required_inline_text(&self.name, "name")?;
        let category = required_inline_text(&self.category, "category")?;
        let distribution_center =
            required_inline_text(&self.distribution_center, "distribution_center")?;

        Ok(NewProduct::new(
            name,
            self.price,
            category,
            distribution_center,
        ))
    }
}

/// JSON body accepted when updating a product. Only name and price change.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    pub id: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
}

impl EditProductForm {
    /// Validates the payload and returns the target id with the update to apply.
    pub fn into_update_product(self) -> ProductFormResult<(String, UpdateProduct)> {
        self.validate()?;

        let id = sanitize_product_id(&self.id)?;
        let name = required_inline_text(&self.name, "name")?;

        Ok((id, UpdateProduct::new(name, self.price)))
    }
}

/// Query string of the category listing endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryQuery {
    #[serde(rename = "categoryAsParam")]
    #[validate(length(min = 1, max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: String,
}

impl CategoryQuery {
    /// Returns the sanitized category label.
    pub fn into_category(self) -> ProductFormResult<String> {
        self.validate()?;
        required_inline_text(&self.category, "categoryAsParam")
    }
}

/// Query string of the distribution check endpoint.
#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    pub cep: String,
    #[serde(rename = "productId")]
    pub product_id: String,
}

impl DistributionQuery {
    /// Returns the normalized postal code and product id.
    pub fn into_parts(self) -> ProductFormResult<(String, String)> {
        let postal_code = normalize_postal_code(&self.cep)?;
        let product_id = sanitize_product_id(&self.product_id)?;
        Ok((postal_code, product_id))
    }
}

/// Query string of the postal code search endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct AddressSearchQuery {
    #[validate(length(min = 2, max = 2))]
    pub state: String,
    #[validate(length(min = 3, max = 128))]
    pub city: String,
    #[validate(length(min = 3, max = 256))]
    pub street: String,
}

impl AddressSearchQuery {
    /// Validates the query and returns `(state, city, street)`.
    pub fn into_parts(self) -> ProductFormResult<(String, String, String)> {
        let state = self.state.trim().to_ascii_uppercase();
        if state.len() != 2 || !state.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(ProductFormError::InvalidState { value: state });
        }
        let city = sanitize_inline_text(&self.city);
        let street = sanitize_inline_text(&self.street);

        let sanitized = Self {
            state,
            city,
            street,
        };
        sanitized.validate()?;

        Ok((sanitized.state, sanitized.city, sanitized.street))
    }
}

/// Strips separators from a postal code and checks it has eight digits.
pub fn normalize_postal_code(input: &str) -> ProductFormResult<String> {
    let digits: String = input
        .chars()
        .filter(|ch| !matches!(ch, '-' | '.' | ' '))
        .collect();

    if digits.len() != POSTAL_CODE_LEN || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ProductFormError::InvalidPostalCode {
            value: input.trim().to_string(),
        });
    }

    Ok(digits)
}

/// Trims the id and checks that it is a UUID.
pub fn sanitize_product_id(input: &str) -> ProductFormResult<String> {
    let trimmed = input.trim();
    match uuid::Uuid::parse_str(trimmed) {
        Ok(id) => Ok(id.to_string()),
        Err(_) => Err(ProductFormError::InvalidId {
            value: trimmed.to_string(),
        }),
    }
}

fn required_inline_text(input: &str, field: &'static str) -> ProductFormResult<String> {
    let sanitized = sanitize_inline_text(input);
    if sanitized.is_empty() {
        return Err(ProductFormError::EmptyField { field });
    }
    Ok(sanitized)
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
