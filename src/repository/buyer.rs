//! Buyer persistence and the purchase-order count per buyer.

use crate::model::{Buyer, BuyerPurchaseOrdersReport, CreateBuyer};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait BuyerRepository: Send + Sync {
    async fn create(&self, buyer: &CreateBuyer) -> Result<Buyer, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Buyer>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Buyer>, sqlx::Error>;
    async fn update(&self, buyer: &Buyer) -> Result<Option<Buyer>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error>;
    async fn count_purchase_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<BuyerPurchaseOrdersReport>, sqlx::Error>;
}

const COLUMNS: &str = "id, card_number_id, first_name, last_name";

pub struct PgBuyerRepository {
    pool: PgPool,
}

impl PgBuyerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBuyerRepository { pool }
    }
}

#[async_trait]
impl BuyerRepository for PgBuyerRepository {
    async fn create(&self, buyer: &CreateBuyer) -> Result<Buyer, sqlx::Error> {
        let sql = format!(
            "INSERT INTO buyers (card_number_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&buyer.card_number_id)
            .bind(&buyer.first_name)
            .bind(&buyer.last_name)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Buyer>, sqlx::Error> {
        let sql = format!("SELECT {} FROM buyers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Buyer>, sqlx::Error> {
        let sql = format!("SELECT {} FROM buyers ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, buyer: &Buyer) -> Result<Option<Buyer>, sqlx::Error> {
        let sql = format!(
            "UPDATE buyers SET card_number_id = $1, first_name = $2, last_name = $3 WHERE id = $4 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = buyer.id, "query");
        sqlx::query_as(&sql)
            .bind(&buyer.card_number_id)
            .bind(&buyer.first_name)
            .bind(&buyer.last_name)
            .bind(buyer.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM buyers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM buyers WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM buyers WHERE card_number_id = $1)";
        tracing::debug!(sql = %sql, card_number_id, "query");
        sqlx::query_scalar(sql).bind(card_number_id).fetch_one(&self.pool).await
    }

    async fn count_purchase_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<BuyerPurchaseOrdersReport>, sqlx::Error> {
        let sql = r#"
            SELECT b.id, b.card_number_id, b.first_name, b.last_name,
                   COUNT(po.id) AS purchase_orders_count
            FROM buyers b
            LEFT JOIN purchase_orders po ON po.buyer_id = b.id
            WHERE $1::BIGINT IS NULL OR b.id = $1
            GROUP BY b.id
            ORDER BY b.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }
}
