//! Product Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found(error.to_string()),
        ProductsServiceError::IdConflict => {
            error!("gave up allocating a product id");

            ApiError::conflict(error.to_string())
        }
        ProductsServiceError::InvalidProductId
        | ProductsServiceError::InvalidPrice
        | ProductsServiceError::InvalidRating
        | ProductsServiceError::RatingOutOfRange
        | ProductsServiceError::InvalidSortBy
        | ProductsServiceError::InvalidOrder
        | ProductsServiceError::InvalidData => ApiError::bad_request(error.to_string()),
        ProductsServiceError::Sql(source) => {
            error!("products storage failure: {source}");

            ApiError::internal()
        }
    }
}
