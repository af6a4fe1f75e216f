//! Section persistence and the batch count per section.

use crate::model::{CreateSection, Section, SectionProductsReport};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn create(&self, section: &CreateSection) -> Result<Section, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Section>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Section>, sqlx::Error>;
    async fn update(&self, section: &Section) -> Result<Option<Section>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_number(&self, section_number: i64) -> Result<bool, sqlx::Error>;
    async fn count_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, sqlx::Error>;
}

const COLUMNS: &str = "id, section_number, current_temperature, minimum_temperature, current_capacity, \
                       minimum_capacity, maximum_capacity, warehouse_id, product_type_id";

pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSectionRepository { pool }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn create(&self, section: &CreateSection) -> Result<Section, sqlx::Error> {
        let sql = format!(
            "INSERT INTO sections (section_number, current_temperature, minimum_temperature, current_capacity, \
             minimum_capacity, maximum_capacity, warehouse_id, product_type_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(section.section_number)
            .bind(section.current_temperature)
            .bind(section.minimum_temperature)
            .bind(section.current_capacity)
            .bind(section.minimum_capacity)
            .bind(section.maximum_capacity)
            .bind(section.warehouse_id)
            .bind(section.product_type_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Section>, sqlx::Error> {
        let sql = format!("SELECT {} FROM sections WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Section>, sqlx::Error> {
        let sql = format!("SELECT {} FROM sections ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, section: &Section) -> Result<Option<Section>, sqlx::Error> {
        let sql = format!(
            "UPDATE sections SET section_number = $1, current_temperature = $2, minimum_temperature = $3, \
             current_capacity = $4, minimum_capacity = $5, maximum_capacity = $6, warehouse_id = $7, \
             product_type_id = $8 WHERE id = $9 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = section.id, "query");
        sqlx::query_as(&sql)
            .bind(section.section_number)
            .bind(section.current_temperature)
            .bind(section.minimum_temperature)
            .bind(section.current_capacity)
            .bind(section.minimum_capacity)
            .bind(section.maximum_capacity)
            .bind(section.warehouse_id)
            .bind(section.product_type_id)
            .bind(section.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM sections WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_number(&self, section_number: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sections WHERE section_number = $1)";
        tracing::debug!(sql = %sql, section_number, "query");
        sqlx::query_scalar(sql).bind(section_number).fetch_one(&self.pool).await
    }

    async fn count_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, sqlx::Error> {
        let sql = r#"
            SELECT s.id AS section_id, s.section_number, COUNT(pb.id) AS products_count
            FROM sections s
            LEFT JOIN product_batches pb ON pb.section_id = s.id
            WHERE $1::BIGINT IS NULL OR s.id = $1
            GROUP BY s.id
            ORDER BY s.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }
}
