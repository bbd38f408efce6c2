//! App Router

use salvo::{catcher::Catcher, prelude::*, serve_static::StaticDir};

use crate::{categories, errors::catch_errors, healthcheck, observability, products};

/// Catalog endpoints under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product_id}")
                        .get(products::get::handler)
                        .patch(products::update::handler),
                ),
        )
}

/// Every route the server exposes apart from the API docs.
pub(crate) fn app_router(images_dir: &str) -> Router {
    Router::new()
        .get(healthcheck::banner)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(api_router())
        .push(Router::with_path("img/{*path}").get(StaticDir::new([images_dir.to_owned()])))
}

/// Wrap a router so that every error leaves as `{msg}`.
pub(crate) fn service(router: Router) -> Service {
    Service::new(router).catcher(Catcher::default().hoop(catch_errors))
}
