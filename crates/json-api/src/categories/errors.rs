//! Category Errors

use tracing::error;

use storefront_app::domain::categories::CategoriesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CategoriesServiceError) -> ApiError {
    match error {
        CategoriesServiceError::AlreadyExists => ApiError::bad_request(error.to_string()),
        CategoriesServiceError::NotFound => ApiError::not_found(error.to_string()),
        CategoriesServiceError::MissingRequiredData => ApiError::needs_all_data(),
        CategoriesServiceError::Sql(source) => {
            error!("categories storage failure: {source}");

            ApiError::internal()
        }
    }
}
