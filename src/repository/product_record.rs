//! Product record persistence.

use crate::model::{CreateProductRecord, ProductRecord};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    async fn create(&self, record: &CreateProductRecord) -> Result<ProductRecord, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<ProductRecord>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<ProductRecord>, sqlx::Error>;
    async fn update(&self, record: &ProductRecord) -> Result<Option<ProductRecord>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str = "id, last_update_date, purchase_price, sale_price, product_id";

pub struct PgProductRecordRepository {
    pool: PgPool,
}

impl PgProductRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        PgProductRecordRepository { pool }
    }
}

#[async_trait]
impl ProductRecordRepository for PgProductRecordRepository {
    async fn create(&self, record: &CreateProductRecord) -> Result<ProductRecord, sqlx::Error> {
        let sql = format!(
            "INSERT INTO product_records (last_update_date, purchase_price, sale_price, product_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(record.last_update_date)
            .bind(record.purchase_price)
            .bind(record.sale_price)
            .bind(record.product_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>, sqlx::Error> {
        let sql = format!("SELECT {} FROM product_records WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let sql = format!("SELECT {} FROM product_records ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, record: &ProductRecord) -> Result<Option<ProductRecord>, sqlx::Error> {
        let sql = format!(
            "UPDATE product_records SET last_update_date = $1, purchase_price = $2, sale_price = $3, \
             product_id = $4 WHERE id = $5 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = record.id, "query");
        sqlx::query_as(&sql)
            .bind(record.last_update_date)
            .bind(record.purchase_price)
            .bind(record.sale_price)
            .bind(record.product_id)
            .bind(record.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM product_records WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_records WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }
}
