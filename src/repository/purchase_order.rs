//! Purchase order persistence.

use crate::model::{CreatePurchaseOrder, PurchaseOrder};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn create(&self, order: &CreatePurchaseOrder) -> Result<PurchaseOrder, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<PurchaseOrder>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, sqlx::Error>;
    async fn update(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str =
    "id, order_number, order_date, tracking_code, buyer_id, product_record_id, order_status_id";

pub struct PgPurchaseOrderRepository {
    pool: PgPool,
}

impl PgPurchaseOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        PgPurchaseOrderRepository { pool }
    }
}

#[async_trait]
impl PurchaseOrderRepository for PgPurchaseOrderRepository {
    async fn create(&self, order: &CreatePurchaseOrder) -> Result<PurchaseOrder, sqlx::Error> {
        let sql = format!(
            "INSERT INTO purchase_orders (order_number, order_date, tracking_code, buyer_id, product_record_id, \
             order_status_id) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&order.order_number)
            .bind(order.order_date)
            .bind(&order.tracking_code)
            .bind(order.buyer_id)
            .bind(order.product_record_id)
            .bind(order.order_status_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let sql = format!("SELECT {} FROM purchase_orders WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, sqlx::Error> {
        let sql = format!("SELECT {} FROM purchase_orders ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let sql = format!(
            "UPDATE purchase_orders SET order_number = $1, order_date = $2, tracking_code = $3, buyer_id = $4, \
             product_record_id = $5, order_status_id = $6 WHERE id = $7 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = order.id, "query");
        sqlx::query_as(&sql)
            .bind(&order.order_number)
            .bind(order.order_date)
            .bind(&order.tracking_code)
            .bind(order.buyer_id)
            .bind(order.product_record_id)
            .bind(order.order_status_id)
            .bind(order.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM purchase_orders WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM purchase_orders WHERE order_number = $1)";
        tracing::debug!(sql = %sql, order_number, "query");
        sqlx::query_scalar(sql).bind(order_number).fetch_one(&self.pool).await
    }
}
