//! Create Category Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::categories::data::NewCategory;

use crate::{
    categories::{errors::into_api_error, index::CategoryResponse},
    errors::ApiError,
    extensions::*,
    payload,
    state::State,
};

/// Category Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryCreatedResponse {
    pub category: CategoryResponse,
}

/// Create Category Handler
///
/// Accepts `{name}`; names are unique and case-sensitive.
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
    ),
)]
#[tracing::instrument(
    name = "categories.create",
    skip(req, depot, res),
    fields(name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryCreatedResponse>, ApiError> {
    let body = payload::read(req).await;
    let name = payload::text(&body, "name").ok_or_else(ApiError::needs_all_data)?;

    tracing::Span::current().record("name", name.as_str());

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(NewCategory { name })
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(name = %category.name, "created category");

    Ok(Json(CategoryCreatedResponse {
        category: category.into(),
    }))
}
