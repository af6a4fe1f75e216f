//! Warehouse persistence.

use crate::model::{CreateWarehouse, Warehouse};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn create(&self, warehouse: &CreateWarehouse) -> Result<Warehouse, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Warehouse>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Warehouse>, sqlx::Error>;
    async fn update(&self, warehouse: &Warehouse) -> Result<Option<Warehouse>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_code(&self, warehouse_code: &str) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str =
    "id, warehouse_code, address, telephone, minimum_capacity, minimum_temperature, locality_id";

pub struct PgWarehouseRepository {
    pool: PgPool,
}

impl PgWarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        PgWarehouseRepository { pool }
    }
}

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    async fn create(&self, warehouse: &CreateWarehouse) -> Result<Warehouse, sqlx::Error> {
        let sql = format!(
            "INSERT INTO warehouses (warehouse_code, address, telephone, minimum_capacity, minimum_temperature, locality_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&warehouse.warehouse_code)
            .bind(&warehouse.address)
            .bind(&warehouse.telephone)
            .bind(warehouse.minimum_capacity)
            .bind(warehouse.minimum_temperature)
            .bind(warehouse.locality_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Warehouse>, sqlx::Error> {
        let sql = format!("SELECT {} FROM warehouses WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Warehouse>, sqlx::Error> {
        let sql = format!("SELECT {} FROM warehouses ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<Option<Warehouse>, sqlx::Error> {
        let sql = format!(
            "UPDATE warehouses SET warehouse_code = $1, address = $2, telephone = $3, minimum_capacity = $4, \
             minimum_temperature = $5, locality_id = $6 WHERE id = $7 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = warehouse.id, "query");
        sqlx::query_as(&sql)
            .bind(&warehouse.warehouse_code)
            .bind(&warehouse.address)
            .bind(&warehouse.telephone)
            .bind(warehouse.minimum_capacity)
            .bind(warehouse.minimum_temperature)
            .bind(warehouse.locality_id)
            .bind(warehouse.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM warehouses WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_code(&self, warehouse_code: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM warehouses WHERE warehouse_code = $1)";
        tracing::debug!(sql = %sql, warehouse_code, "query");
        sqlx::query_scalar(sql).bind(warehouse_code).fetch_one(&self.pool).await
    }
}
