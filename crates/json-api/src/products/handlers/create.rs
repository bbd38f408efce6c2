//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    payload,
    products::{errors::into_api_error, get::SingleProductResponse, requests},
    state::State,
};

/// Create Product Handler
///
/// Accepts `{title, price, description, category}`. The id, image path and
/// rating are always assigned by the server.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(req, depot, res),
    fields(product_id = tracing::field::Empty, category = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SingleProductResponse>, ApiError> {
    let product = requests::new_product(&payload::read(req).await)?;

    let span = tracing::Span::current();

    span.record("category", tracing::field::display(&product.category));

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_api_error)?;

    span.record("product_id", tracing::field::display(product.id));

    res.add_header(LOCATION, format!("/api/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_id = %product.id, "created product");

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, data::NewProduct, rating::Rating,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{make_product, products_service},
    };

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").post(handler))
    }

    fn expected_new_product() -> NewProduct {
        NewProduct {
            title: "t".to_string(),
            price: 10.0,
            description: "d".to_string(),
            category: "electronics".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| *new == expected_new_product())
            .return_once(|new| {
                let mut product = make_product(21);

                product.title = new.title;
                product.price = new.price;
                product.description = new.description;
                product.category = new.category;
                product.rating = Rating::UNRATED;

                Ok(product)
            });

        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "t",
                "price": 10,
                "description": "d",
                "category": "electronics",
                "image": "/img/hijack.jpg",
                "id": 99,
            }))
            .send(&make_service(repo))
            .await;

        let body: SingleProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/api/products/21"));
        assert_eq!(body.product.id, 21);
        assert_eq!(body.product.image, "/img/21.jpg");
        assert_eq!(body.product.rating.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_field_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "title": "t", "price": 10, "description": "d" }))
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.msg, "needs all data");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_nul_in_text_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "a\u{0000}b",
                "price": 10,
                "description": "d",
                "category": "electronics",
            }))
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.msg, "needs all data");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_body_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.msg, "needs all data");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_invalid_price_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "t",
                "price": -1,
                "description": "d",
                "category": "electronics",
            }))
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.msg, "invalid price");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_id_conflict_returns_409() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::IdConflict));

        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_rate_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "t",
                "price": 10,
                "description": "d",
                "category": "electronics",
            }))
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.msg, "product id allocation conflict");

        Ok(())
    }
}
