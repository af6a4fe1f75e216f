//! Carrier persistence.

use crate::model::{Carrier, CreateCarrier};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait CarrierRepository: Send + Sync {
    async fn create(&self, carrier: &CreateCarrier) -> Result<Carrier, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Carrier>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Carrier>, sqlx::Error>;
    async fn update(&self, carrier: &Carrier) -> Result<Option<Carrier>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists_cid(&self, cid: &str) -> Result<bool, sqlx::Error>;
}

const COLUMNS: &str = "id, cid, company_name, address, telephone, locality_id";

pub struct PgCarrierRepository {
    pool: PgPool,
}

impl PgCarrierRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCarrierRepository { pool }
    }
}

#[async_trait]
impl CarrierRepository for PgCarrierRepository {
    async fn create(&self, carrier: &CreateCarrier) -> Result<Carrier, sqlx::Error> {
        let sql = format!(
            "INSERT INTO carriers (cid, company_name, address, telephone, locality_id) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&carrier.cid)
            .bind(&carrier.company_name)
            .bind(&carrier.address)
            .bind(&carrier.telephone)
            .bind(carrier.locality_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Carrier>, sqlx::Error> {
        let sql = format!("SELECT {} FROM carriers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Carrier>, sqlx::Error> {
        let sql = format!("SELECT {} FROM carriers ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, carrier: &Carrier) -> Result<Option<Carrier>, sqlx::Error> {
        let sql = format!(
            "UPDATE carriers SET cid = $1, company_name = $2, address = $3, telephone = $4, locality_id = $5 \
             WHERE id = $6 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = carrier.id, "query");
        sqlx::query_as(&sql)
            .bind(&carrier.cid)
            .bind(&carrier.company_name)
            .bind(&carrier.address)
            .bind(&carrier.telephone)
            .bind(carrier.locality_id)
            .bind(carrier.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM carriers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists_cid(&self, cid: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM carriers WHERE cid = $1)";
        tracing::debug!(sql = %sql, cid, "query");
        sqlx::query_scalar(sql).bind(cid).fetch_one(&self.pool).await
    }
}
