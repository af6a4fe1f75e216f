//! Inbound order persistence.

use crate::model::{CreateInboundOrder, InboundOrder};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait InboundOrderRepository: Send + Sync {
    async fn create(&self, order: &CreateInboundOrder) -> Result<InboundOrder, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<InboundOrder>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<InboundOrder>, sqlx::Error>;
    async fn update(&self, order: &InboundOrder) -> Result<Option<InboundOrder>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str = "id, order_date, order_number, employee_id, product_batch_id, warehouse_id";

pub struct PgInboundOrderRepository {
    pool: PgPool,
}

impl PgInboundOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        PgInboundOrderRepository { pool }
    }
}

#[async_trait]
impl InboundOrderRepository for PgInboundOrderRepository {
    async fn create(&self, order: &CreateInboundOrder) -> Result<InboundOrder, sqlx::Error> {
        let sql = format!(
            "INSERT INTO inbound_orders (order_date, order_number, employee_id, product_batch_id, warehouse_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(order.order_date)
            .bind(&order.order_number)
            .bind(order.employee_id)
            .bind(order.product_batch_id)
            .bind(order.warehouse_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<InboundOrder>, sqlx::Error> {
        let sql = format!("SELECT {} FROM inbound_orders WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<InboundOrder>, sqlx::Error> {
        let sql = format!("SELECT {} FROM inbound_orders ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, order: &InboundOrder) -> Result<Option<InboundOrder>, sqlx::Error> {
        let sql = format!(
            "UPDATE inbound_orders SET order_date = $1, order_number = $2, employee_id = $3, \
             product_batch_id = $4, warehouse_id = $5 WHERE id = $6 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = order.id, "query");
        sqlx::query_as(&sql)
            .bind(order.order_date)
            .bind(&order.order_number)
            .bind(order.employee_id)
            .bind(order.product_batch_id)
            .bind(order.warehouse_id)
            .bind(order.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM inbound_orders WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM inbound_orders WHERE order_number = $1)";
        tracing::debug!(sql = %sql, order_number, "query");
        sqlx::query_scalar(sql).bind(order_number).fetch_one(&self.pool).await
    }
}
