//! Categories Repository

use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::Db,
    domain::categories::{data::NewCategory, records::CategoryRecord},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CATEGORY_EXISTS_SQL: &str = include_str!("sql/category_exists.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed categories repository.
pub(crate) struct PgCategoriesRepository {
    db: Db,
}

impl PgCategoriesRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(self.db.pool())
            .await
    }

    pub(crate) async fn category_exists(&self, name: &str) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CATEGORY_EXISTS_SQL)
            .bind(name)
            .fetch_one(self.db.pool())
            .await
    }

    pub(crate) async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.name)
            .fetch_one(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
        })
    }
}
