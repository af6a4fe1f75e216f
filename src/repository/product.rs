//! Product persistence and the record count per product.

use crate::model::{CreateProduct, Product, ProductRecordsReport};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &CreateProduct) -> Result<Product, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Product>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Product>, sqlx::Error>;
    async fn update(&self, product: &Product) -> Result<Option<Product>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_code(&self, product_code: &str) -> Result<bool, sqlx::Error>;
    async fn count_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, sqlx::Error>;
}

const COLUMNS: &str = "id, product_code, description, width, height, length, net_weight, expiration_rate, \
                       recommended_freezing_temperature, freezing_rate, product_type_id, seller_id";

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        PgProductRepository { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &CreateProduct) -> Result<Product, sqlx::Error> {
        let sql = format!(
            "INSERT INTO products (product_code, description, width, height, length, net_weight, expiration_rate, \
             recommended_freezing_temperature, freezing_rate, product_type_id, seller_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&product.product_code)
            .bind(&product.description)
            .bind(product.width)
            .bind(product.height)
            .bind(product.length)
            .bind(product.net_weight)
            .bind(product.expiration_rate)
            .bind(product.recommended_freezing_temperature)
            .bind(product.freezing_rate)
            .bind(product.product_type_id)
            .bind(product.seller_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        let sql = format!("SELECT {} FROM products ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, sqlx::Error> {
        let sql = format!(
            "UPDATE products SET product_code = $1, description = $2, width = $3, height = $4, length = $5, \
             net_weight = $6, expiration_rate = $7, recommended_freezing_temperature = $8, freezing_rate = $9, \
             product_type_id = $10, seller_id = $11 WHERE id = $12 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = product.id, "query");
        sqlx::query_as(&sql)
            .bind(&product.product_code)
            .bind(&product.description)
            .bind(product.width)
            .bind(product.height)
            .bind(product.length)
            .bind(product.net_weight)
            .bind(product.expiration_rate)
            .bind(product.recommended_freezing_temperature)
            .bind(product.freezing_rate)
            .bind(product.product_type_id)
            .bind(product.seller_id)
            .bind(product.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM products WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_code(&self, product_code: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM products WHERE product_code = $1)";
        tracing::debug!(sql = %sql, product_code, "query");
        sqlx::query_scalar(sql).bind(product_code).fetch_one(&self.pool).await
    }

    async fn count_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, sqlx::Error> {
        let sql = r#"
            SELECT p.id AS product_id, p.description, COUNT(pr.id) AS records_count
            FROM products p
            LEFT JOIN product_records pr ON pr.product_id = p.id
            WHERE $1::BIGINT IS NULL OR p.id = $1
            GROUP BY p.id
            ORDER BY p.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }
}
