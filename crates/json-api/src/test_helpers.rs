//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        categories::MockCategoriesService,
        products::{
            MockProductsService,
            rating::Rating,
            records::{ProductId, ProductRecord},
        },
    },
};

use crate::{router, state::State};

pub(crate) fn make_product(id: i64) -> ProductRecord {
    let id = ProductId::new(id);

    ProductRecord {
        id,
        title: format!("Product {id}"),
        price: 10.5,
        description: "A test product".to_string(),
        category: "electronics".to_string(),
        image: id.image_path(),
        rating: Rating {
            rate: 3.5,
            count: 10,
        },
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_rate_product().never();

    products
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_ensure_category_exists().never();
    categories.expect_create_category().never();

    categories
}

pub(crate) fn state(
    products: MockProductsService,
    categories: MockCategoriesService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        categories: Arc::new(categories),
    })
}

pub(crate) fn service(
    products: MockProductsService,
    categories: MockCategoriesService,
    route: Router,
) -> Service {
    router::service(
        Router::new()
            .hoop(inject(state(products, categories)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(products, strict_categories_mock(), route)
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    service(strict_products_mock(), categories, route)
}
