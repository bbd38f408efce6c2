//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::{
    rating::Rating,
    records::{ProductId, ProductRecord},
};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error, state::State};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    /// Mean of every submitted rating, 0 when unrated
    pub rate: f64,

    /// Number of submitted ratings
    pub count: u64,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        RatingResponse {
            rate: rating.rate,
            count: rating.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The public identifier of the product
    pub id: i64,

    pub title: String,

    /// The price of the product, at least 0.01
    pub price: f64,

    pub description: String,

    /// Free-text category name
    pub category: String,

    /// Image path, always `/img/{id}.jpg`
    pub image: String,

    pub rating: RatingResponse,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_inner(),
            title: product.title,
            price: product.price,
            description: product.description,
            category: product.category,
            image: product.image,
            rating: product.rating.into(),
        }
    }
}

/// Single product envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct SingleProductResponse {
    pub product: ProductResponse,
}

impl From<ProductRecord> for SingleProductResponse {
    fn from(product: ProductRecord) -> Self {
        SingleProductResponse {
            product: product.into(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product by its numeric id.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
    ),
)]
pub(crate) async fn handler(
    product_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<SingleProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = product_id
        .into_inner()
        .parse::<ProductId>()
        .map_err(into_api_error)?;

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_api_error)?;

    Ok(Json(product.into()))
}
