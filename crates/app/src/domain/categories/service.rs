//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use crate::{
    database::Db,
    domain::{
        categories::{
            data::NewCategory, errors::CategoriesServiceError, records::CategoryRecord,
            repository::PgCategoriesRepository,
        },
        is_storable_text,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgCategoriesRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        self.repository
            .list_categories()
            .await
            .map_err(Into::into)
    }

    async fn ensure_category_exists(&self, name: String) -> Result<(), CategoriesServiceError> {
        if is_storable_text(&name) && self.repository.category_exists(&name).await? {
            Ok(())
        } else {
            Err(CategoriesServiceError::NotFound)
        }
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.name.is_empty() || !is_storable_text(&category.name) {
            return Err(CategoriesServiceError::MissingRequiredData);
        }

        self.repository
            .create_category(category)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Category persistence operations.
pub trait CategoriesService: Send + Sync {
    /// Lists every category.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Succeeds when a category with exactly this name exists.
    async fn ensure_category_exists(&self, name: String) -> Result<(), CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}
