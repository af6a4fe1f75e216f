//! Product batch persistence.

use crate::model::{CreateProductBatch, ProductBatch};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait ProductBatchRepository: Send + Sync {
    async fn create(&self, batch: &CreateProductBatch) -> Result<ProductBatch, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<ProductBatch>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<ProductBatch>, sqlx::Error>;
    async fn update(&self, batch: &ProductBatch) -> Result<Option<ProductBatch>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_number(&self, batch_number: i64) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str = "id, batch_number, current_quantity, current_temperature, due_date, initial_quantity, \
                       manufacturing_date, manufacturing_hour, minimum_temperature, product_id, section_id";

pub struct PgProductBatchRepository {
    pool: PgPool,
}

impl PgProductBatchRepository {
    pub fn new(pool: PgPool) -> Self {
        PgProductBatchRepository { pool }
    }
}

#[async_trait]
impl ProductBatchRepository for PgProductBatchRepository {
    async fn create(&self, batch: &CreateProductBatch) -> Result<ProductBatch, sqlx::Error> {
        let sql = format!(
            "INSERT INTO product_batches (batch_number, current_quantity, current_temperature, due_date, \
             initial_quantity, manufacturing_date, manufacturing_hour, minimum_temperature, product_id, section_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(batch.batch_number)
            .bind(batch.current_quantity)
            .bind(batch.current_temperature)
            .bind(batch.due_date)
            .bind(batch.initial_quantity)
            .bind(batch.manufacturing_date)
            .bind(batch.manufacturing_hour)
            .bind(batch.minimum_temperature)
            .bind(batch.product_id)
            .bind(batch.section_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<ProductBatch>, sqlx::Error> {
        let sql = format!("SELECT {} FROM product_batches WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<ProductBatch>, sqlx::Error> {
        let sql = format!("SELECT {} FROM product_batches ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, batch: &ProductBatch) -> Result<Option<ProductBatch>, sqlx::Error> {
        let sql = format!(
            "UPDATE product_batches SET batch_number = $1, current_quantity = $2, current_temperature = $3, \
             due_date = $4, initial_quantity = $5, manufacturing_date = $6, manufacturing_hour = $7, \
             minimum_temperature = $8, product_id = $9, section_id = $10 WHERE id = $11 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = batch.id, "query");
        sqlx::query_as(&sql)
            .bind(batch.batch_number)
            .bind(batch.current_quantity)
            .bind(batch.current_temperature)
            .bind(batch.due_date)
            .bind(batch.initial_quantity)
            .bind(batch.manufacturing_date)
            .bind(batch.manufacturing_hour)
            .bind(batch.minimum_temperature)
            .bind(batch.product_id)
            .bind(batch.section_id)
            .bind(batch.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM product_batches WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_batches WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_number(&self, batch_number: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_batches WHERE batch_number = $1)";
        tracing::debug!(sql = %sql, batch_number, "query");
        sqlx::query_scalar(sql).bind(batch_number).fetch_one(&self.pool).await
    }
}
