//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

const PRICE_CONSTRAINT: &str = "products_price_min";
const RATING_RATE_CONSTRAINT: &str = "products_rating_rate_range";

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product id allocation conflict")]
    IdConflict,

    #[error("invalid product id")]
    InvalidProductId,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid rating")]
    InvalidRating,

    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("invalid sort by")]
    InvalidSortBy,

    #[error("invalid order")]
    InvalidOrder,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        error
            .as_database_error()
            .and_then(classify)
            .unwrap_or(Self::Sql(error))
    }
}

fn classify(error: &(dyn DatabaseError + 'static)) -> Option<ProductsServiceError> {
    match (error.kind(), error.constraint()) {
        (ErrorKind::UniqueViolation, _) => Some(ProductsServiceError::IdConflict),
        (ErrorKind::CheckViolation, Some(PRICE_CONSTRAINT)) => {
            Some(ProductsServiceError::InvalidPrice)
        }
        (ErrorKind::CheckViolation, Some(RATING_RATE_CONSTRAINT)) => {
            Some(ProductsServiceError::InvalidRating)
        }
        (ErrorKind::CheckViolation | ErrorKind::NotNullViolation, _) => {
            Some(ProductsServiceError::InvalidData)
        }
        _ => None,
    }
}
