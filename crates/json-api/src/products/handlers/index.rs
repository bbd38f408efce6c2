//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::query::{ProductsQuery, SortField, SortOrder};

use crate::{
    categories,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Product Index Handler
///
/// Lists products, optionally restricted to one category and sorted by a
/// single field. Ties are broken by ascending id.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    sortby: QueryParam<String, false>,
    order: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sort_by = non_empty(sortby.into_inner())
        .map(|sort_by| sort_by.parse::<SortField>())
        .transpose()
        .map_err(into_api_error)?
        .unwrap_or_default();

    let category = non_empty(category.into_inner());
    let order = order.into_inner();

    let listing = async {
        let order = order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        state
            .app
            .products
            .list_products(ProductsQuery {
                category: category.clone(),
                sort_by,
                order,
            })
            .await
    };

    let products = match &category {
        Some(name) => {
            let (exists, products) = tokio::join!(
                state.app.categories.ensure_category_exists(name.clone()),
                listing
            );

            exists.map_err(categories::errors::into_api_error)?;

            products
        }
        None => listing.await,
    }
    .map_err(into_api_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        categories::{CategoriesServiceError, MockCategoriesService},
        products::{MockProductsService, ProductsServiceError},
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{make_product, products_service, service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("products").get(handler)
    }

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, route())
    }

    fn no_other_product_calls(repo: &mut MockProductsService) {
        repo.expect_get_product().never();
        repo.expect_create_product().never();
        repo.expect_rate_product().never();
    }

    #[tokio::test]
    async fn test_index_defaults_to_rating_ascending() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|query| *query == ProductsQuery::default())
            .return_once(|_| Ok(vec![make_product(1), make_product(2)]));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        let body: ProductsResponse = res.take_json().await?;
        let ids: Vec<i64> = body.products.iter().map(|product| product.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![1, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_sort_and_order() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|query| {
                *query
                    == ProductsQuery {
                        category: None,
                        sort_by: SortField::RatingCount,
                        order: SortOrder::Descending,
                    }
            })
            .return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let res = TestClient::get("http://example.com/products?sortby=rating.count&order=-1")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_coerces_leading_integer_order() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|query| query.order == SortOrder::Ascending)
            .return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let res = TestClient::get("http://example.com/products?order=1.0")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_sortby_returns_400_without_listing() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products().never();
        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products?sortby=id")
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.msg, "invalid sort by");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_order_returns_400() -> TestResult {
        for order in ["2", "0", "asc", ""] {
            let mut repo = MockProductsService::new();

            repo.expect_list_products().never();
            no_other_product_calls(&mut repo);

            let mut res = TestClient::get(format!("http://example.com/products?order={order}"))
                .send(&make_service(repo))
                .await;

            let body: ErrorBody = res.take_json().await?;

            assert_eq!(
                res.status_code,
                Some(StatusCode::BAD_REQUEST),
                "order = {order:?}"
            );
            assert_eq!(body.msg, "invalid order");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_index_filters_by_existing_category() -> TestResult {
        let mut repo = MockProductsService::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_ensure_category_exists()
            .once()
            .withf(|name| name == "men's clothing")
            .return_once(|_| Ok(()));

        categories.expect_list_categories().never();
        categories.expect_create_category().never();

        repo.expect_list_products()
            .once()
            .withf(|query| {
                *query
                    == ProductsQuery {
                        category: Some("men's clothing".to_string()),
                        sort_by: SortField::Price,
                        order: SortOrder::Descending,
                    }
            })
            .return_once(|_| Ok(vec![make_product(1)]));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get(
            "http://example.com/products?category=men%27s%20clothing&sortby=price&order=-1",
        )
        .send(&service(repo, categories, route()))
        .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_existing_category_without_products_returns_empty() -> TestResult {
        let mut repo = MockProductsService::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_ensure_category_exists()
            .once()
            .return_once(|_| Ok(()));

        categories.expect_list_categories().never();
        categories.expect_create_category().never();

        repo.expect_list_products().once().return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products?category=children%27s%20clothing")
            .send(&service(repo, categories, route()))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_ensure_category_exists()
            .once()
            .withf(|name| name == "Electronics")
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        categories.expect_list_categories().never();
        categories.expect_create_category().never();

        repo.expect_list_products().once().return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products?category=Electronics")
            .send(&service(repo, categories, route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.msg, "category not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_category_with_nul_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_ensure_category_exists()
            .once()
            .withf(|name| name == "x\u{0}")
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        categories.expect_list_categories().never();
        categories.expect_create_category().never();

        repo.expect_list_products()
            .once()
            .withf(|query| query.category.as_deref() == Some("x\u{0}"))
            .return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products?category=x%00")
            .send(&service(repo, categories, route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.msg, "category not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_wins_over_invalid_order() -> TestResult {
        let mut repo = MockProductsService::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_ensure_category_exists()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        categories.expect_list_categories().never();
        categories.expect_create_category().never();

        repo.expect_list_products().never();

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products?category=toys&order=5")
            .send(&service(repo, categories, route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.msg, "category not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_category_means_no_filter() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|query| query.category.is_none())
            .return_once(|_| Ok(vec![]));

        no_other_product_calls(&mut repo);

        let res = TestClient::get("http://example.com/products?category=")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_failure_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        no_other_product_calls(&mut repo);

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.msg, "internal server error");

        Ok(())
    }
}
