//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        is_storable_text,
        products::{
            data::NewProduct,
            errors::ProductsServiceError,
            query::ProductsQuery,
            rating::RatingSubmission,
            records::{ProductId, ProductRecord},
            repository::PgProductsRepository,
        },
    },
};

/// Attempts made to allocate a product id before reporting a conflict.
pub const MAX_ID_ALLOCATION_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    /// Allocate `max(id) + 1` and insert within a single transaction. The
    /// advisory lock makes concurrent creators queue; a unique violation can
    /// still surface if ids are written outside this path, e.g. by seeding.
    async fn try_create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_id_allocation(&mut tx).await?;

        let id = self.repository.next_product_id(&mut tx).await?;

        let created = self
            .repository
            .create_product(&mut tx, id, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if !query.category.as_deref().is_none_or(is_storable_text) {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        for attempt in 1..=MAX_ID_ALLOCATION_ATTEMPTS {
            match self.try_create_product(&product).await {
                Err(ProductsServiceError::IdConflict) => {
                    warn!(attempt, "product id allocation raced, retrying");
                }
                result => return result,
            }
        }

        Err(ProductsServiceError::IdConflict)
    }

    async fn rate_product(
        &self,
        product: ProductId,
        submission: RatingSubmission,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        let updated = self
            .repository
            .update_rating(&mut tx, product, current.rating.record(submission))
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products matching the query, in the requested order.
    async fn list_products(
        &self,
        query: ProductsQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product with the next free id, derived image path and an
    /// unrated rating.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Folds a rating submission into the product's running mean.
    async fn rate_product(
        &self,
        product: ProductId,
        submission: RatingSubmission,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
