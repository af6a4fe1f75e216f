//! Locality persistence and the seller/carrier counts per locality.

use crate::model::{CreateLocality, Locality, LocalityCarriersReport, LocalitySellersReport};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait LocalityRepository: Send + Sync {
    async fn create(&self, locality: &CreateLocality) -> Result<Locality, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Locality>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Locality>, sqlx::Error>;
    async fn update(&self, locality: &Locality) -> Result<Option<Locality>, sqlx::Error>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_place(
        &self,
        locality_name: &str,
        province_name: &str,
        country_name: &str,
    ) -> Result<bool, sqlx::Error>;
    /// One row per locality (or only `id` when given), zero-filled.
    async fn count_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, sqlx::Error>;
    async fn count_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, sqlx::Error>;
}

const COLUMNS: &str = "id, locality_name, province_name, country_name";

pub struct PgLocalityRepository {
    pool: PgPool,
}

impl PgLocalityRepository {
    pub fn new(pool: PgPool) -> Self {
        PgLocalityRepository { pool }
    }
}

#[async_trait]
impl LocalityRepository for PgLocalityRepository {
    async fn create(&self, locality: &CreateLocality) -> Result<Locality, sqlx::Error> {
        let sql = format!(
            "INSERT INTO localities (locality_name, province_name, country_name) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&locality.locality_name)
            .bind(&locality.province_name)
            .bind(&locality.country_name)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Locality>, sqlx::Error> {
        let sql = format!("SELECT {} FROM localities WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Locality>, sqlx::Error> {
        let sql = format!("SELECT {} FROM localities ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, locality: &Locality) -> Result<Option<Locality>, sqlx::Error> {
        let sql = format!(
            "UPDATE localities SET locality_name = $1, province_name = $2, country_name = $3 WHERE id = $4 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = locality.id, "query");
        sqlx::query_as(&sql)
            .bind(&locality.locality_name)
            .bind(&locality.province_name)
            .bind(&locality.country_name)
            .bind(locality.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM localities WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM localities WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_place(
        &self,
        locality_name: &str,
        province_name: &str,
        country_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM localities WHERE locality_name = $1 AND province_name = $2 AND country_name = $3)";
        tracing::debug!(sql = %sql, "query");
        sqlx::query_scalar(sql)
            .bind(locality_name)
            .bind(province_name)
            .bind(country_name)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, sqlx::Error> {
        let sql = r#"
            SELECT l.id AS locality_id, l.locality_name, COUNT(s.id) AS sellers_count
            FROM localities l
            LEFT JOIN sellers s ON s.locality_id = l.id
            WHERE $1::BIGINT IS NULL OR l.id = $1
            GROUP BY l.id
            ORDER BY l.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }

    async fn count_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, sqlx::Error> {
        let sql = r#"
            SELECT l.id AS locality_id, l.locality_name, COUNT(c.id) AS carriers_count
            FROM localities l
            LEFT JOIN carriers c ON c.locality_id = l.id
            WHERE $1::BIGINT IS NULL OR l.id = $1
            GROUP BY l.id
            ORDER BY l.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }
}
