//! Seller persistence.

use crate::model::{CreateSeller, Seller};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn create(&self, seller: &CreateSeller) -> Result<Seller, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Seller>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Seller>, sqlx::Error>;
    async fn update(&self, seller: &Seller) -> Result<Option<Seller>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_cid(&self, cid: i64) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str = "id, cid, company_name, address, telephone, locality_id";

pub struct PgSellerRepository {
    pool: PgPool,
}

impl PgSellerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSellerRepository { pool }
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    async fn create(&self, seller: &CreateSeller) -> Result<Seller, sqlx::Error> {
        let sql = format!(
            "INSERT INTO sellers (cid, company_name, address, telephone, locality_id) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(seller.cid)
            .bind(&seller.company_name)
            .bind(&seller.address)
            .bind(&seller.telephone)
            .bind(seller.locality_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Seller>, sqlx::Error> {
        let sql = format!("SELECT {} FROM sellers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Seller>, sqlx::Error> {
        let sql = format!("SELECT {} FROM sellers ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, seller: &Seller) -> Result<Option<Seller>, sqlx::Error> {
        let sql = format!(
            "UPDATE sellers SET cid = $1, company_name = $2, address = $3, telephone = $4, locality_id = $5 WHERE id = $6 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = seller.id, "query");
        sqlx::query_as(&sql)
            .bind(seller.cid)
            .bind(&seller.company_name)
            .bind(&seller.address)
            .bind(&seller.telephone)
            .bind(seller.locality_id)
            .bind(seller.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM sellers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sellers WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_cid(&self, cid: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sellers WHERE cid = $1)";
        tracing::debug!(sql = %sql, cid, "query");
        sqlx::query_scalar(sql).bind(cid).fetch_one(&self.pool).await
    }
}
