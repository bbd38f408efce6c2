//! Products Repository

use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};

use crate::domain::products::{
    data::NewProduct,
    query::ProductsQuery,
    rating::Rating,
    records::{ProductId, ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LOCK_ID_ALLOCATION_SQL: &str = include_str!("sql/lock_id_allocation.sql");
const NEXT_PRODUCT_ID_SQL: &str = include_str!("sql/next_product_id.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_RATING_SQL: &str = include_str!("sql/update_rating.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &ProductsQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let sql = format!(
            "{}\n{}",
            LIST_PRODUCTS_SQL.trim_end(),
            query.order_by_clause()
        );

        query_as::<Postgres, ProductRecord>(&sql)
            .bind(query.category.as_deref())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    /// Serialize id allocation until the transaction ends.
    pub(crate) async fn lock_id_allocation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_ID_ALLOCATION_SQL).execute(&mut **tx).await?;

        Ok(())
    }

    pub(crate) async fn next_product_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ProductId, sqlx::Error> {
        query_scalar::<Postgres, i64>(NEXT_PRODUCT_ID_SQL)
            .fetch_one(&mut **tx)
            .await
            .map(ProductId::new)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let rating = Rating::UNRATED;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(id.into_inner())
            .bind(&product.title)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.category)
            .bind(id.image_path())
            .bind(rating.rate)
            .bind(count_to_i64(rating.count)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        rating: Rating,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_RATING_SQL)
            .bind(product.into_inner())
            .bind(rating.rate)
            .bind(count_to_i64(rating.count)?)
            .fetch_one(&mut **tx)
            .await
    }
}

fn count_to_i64(count: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: "rating_count".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let count_i64: i64 = row.try_get("rating_count")?;

        let count = u64::try_from(count_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating_count".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
            rating: Rating {
                rate: row.try_get("rating_rate")?,
                count,
            },
        })
    }
}
