//! Seed data bundled with the crate.
//!
//! Loading replaces every category and product with the bundled catalog, so
//! it is meant for development databases and test setup only.

use serde::Deserialize;
use sqlx::{PgPool, query};
use thiserror::Error;
use tracing::info;

const CATEGORIES_JSON: &str = include_str!("../../../../fixtures/categories.json");
const PRODUCTS_JSON: &str = include_str!("../../../../fixtures/products.json");

const TRUNCATE_SQL: &str = include_str!("sql/truncate.sql");
const INSERT_CATEGORY_SQL: &str = include_str!("sql/insert_category.sql");
const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");

#[derive(Debug, Error)]
pub enum FixturesError {
    #[error("failed to parse {file}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture rating count {0} does not fit in storage")]
    RatingCount(u64),

    #[error("failed to load fixtures")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingFixture {
    pub rate: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: RatingFixture,
}

#[derive(Debug, Clone)]
pub struct Fixtures {
    pub categories: Vec<CategoryFixture>,
    pub products: Vec<ProductFixture>,
}

impl Fixtures {
    /// Parse the catalog shipped in `fixtures/`.
    ///
    /// # Errors
    ///
    /// Returns [`FixturesError::Parse`] if either bundled file is malformed.
    pub fn bundled() -> Result<Self, FixturesError> {
        Ok(Self {
            categories: serde_json::from_str(CATEGORIES_JSON).map_err(|source| {
                FixturesError::Parse {
                    file: "categories.json",
                    source,
                }
            })?,
            products: serde_json::from_str(PRODUCTS_JSON).map_err(|source| {
                FixturesError::Parse {
                    file: "products.json",
                    source,
                }
            })?,
        })
    }
}

/// Replace the catalog with `fixtures` in a single transaction.
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is committed in that case.
pub async fn seed(pool: &PgPool, fixtures: &Fixtures) -> Result<(), FixturesError> {
    let mut tx = pool.begin().await?;

    query(TRUNCATE_SQL).execute(&mut *tx).await?;

    for category in &fixtures.categories {
        query(INSERT_CATEGORY_SQL)
            .bind(&category.name)
            .execute(&mut *tx)
            .await?;
    }

    for product in &fixtures.products {
        let count = i64::try_from(product.rating.count)
            .map_err(|_overflow| FixturesError::RatingCount(product.rating.count))?;

        query(INSERT_PRODUCT_SQL)
            .bind(product.id)
            .bind(&product.title)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.category)
            .bind(&product.image)
            .bind(product.rating.rate)
            .bind(count)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        categories = fixtures.categories.len(),
        products = fixtures.products.len(),
        "fixtures loaded"
    );

    Ok(())
}
