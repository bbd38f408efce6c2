//! Rate Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::products::{ProductsServiceError, records::ProductId};

use crate::{
    errors::ApiError,
    extensions::*,
    payload,
    products::{errors::into_api_error, get::SingleProductResponse, requests},
    state::State,
};

/// Rate Product Handler
///
/// Folds a rating between 1 and 5 into the product's running mean.
#[endpoint(
    tags("products"),
    summary = "Rate Product",
    responses(
        (status_code = StatusCode::OK, description = "Rating recorded"),
    ),
)]
#[tracing::instrument(
    name = "products.rate",
    skip(product_id, req, depot),
    fields(
        product_id = tracing::field::Empty,
        rate = tracing::field::Empty,
        rating_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product_id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SingleProductResponse>, ApiError> {
    let product = product_id
        .into_inner()
        .parse::<ProductId>()
        .map_err(into_api_error)?;

    let submission = requests::rating_submission(&payload::read(req).await)?;

    let span = tracing::Span::current();

    span.record("product_id", tracing::field::display(product));
    span.record("rate", submission.value());

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .rate_product(product, submission)
        .await
        .map_err(|error| match error {
            ProductsServiceError::NotFound => ApiError::not_found("product doesn't exist"),
            error => into_api_error(error),
        })?;

    span.record("rating_count", product.rating.count);

    tracing::info!(
        product_id = %product.id,
        rate = product.rating.rate,
        count = product.rating.count,
        "rated product"
    );

    Ok(Json(product.into()))
}
