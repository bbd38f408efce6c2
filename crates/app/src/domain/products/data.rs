//! Products Data

use crate::domain::{is_storable_text, products::errors::ProductsServiceError};

/// Smallest price a product may carry.
pub const MIN_PRICE: f64 = 0.01;

/// New Product Data
///
/// The id, image path and rating are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl NewProduct {
    /// Check write-time invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] when a text field holds a
    /// NUL character, and [`ProductsServiceError::InvalidPrice`] when the price
    /// is not a finite number of at least [`MIN_PRICE`].
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        let texts = [&self.title, &self.description, &self.category];

        if !texts.iter().all(|text| is_storable_text(text)) {
            return Err(ProductsServiceError::InvalidData);
        }

        validate_price(self.price).map(|_price| ())
    }
}

/// Validate a candidate price.
///
/// # Errors
///
/// Returns [`ProductsServiceError::InvalidPrice`] for non-finite prices and
/// prices below [`MIN_PRICE`].
pub fn validate_price(price: f64) -> Result<f64, ProductsServiceError> {
    if price.is_finite() && price >= MIN_PRICE {
        Ok(price)
    } else {
        Err(ProductsServiceError::InvalidPrice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_price_is_accepted() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(10.0).is_ok());
    }

    #[test]
    fn text_with_nul_is_invalid_data() {
        let product = NewProduct {
            title: "a\u{0}b".to_string(),
            price: 10.0,
            description: "d".to_string(),
            category: "electronics".to_string(),
        };

        assert!(
            matches!(product.validate(), Err(ProductsServiceError::InvalidData)),
            "expected NUL in title to be rejected"
        );
    }

    #[test]
    fn low_and_non_finite_prices_are_rejected() {
        for price in [0.0, 0.009, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(validate_price(price), Err(ProductsServiceError::InvalidPrice)),
                "expected {price} to be rejected"
            );
        }
    }
}
