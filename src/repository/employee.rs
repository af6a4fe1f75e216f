//! Employee persistence and the inbound-order count per employee.

use crate::model::{CreateEmployee, Employee, EmployeeInboundOrdersReport};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: &CreateEmployee) -> Result<Employee, sqlx::Error>;
    async fn get(&self, id: i64) -> Result<Option<Employee>, sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Employee>, sqlx::Error>;
    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error>;
    async fn count_inbound_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<EmployeeInboundOrdersReport>, sqlx::Error>;
}

const COLUMNS: &str = "id, card_number_id, first_name, last_name, warehouse_id";

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeRepository { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, employee: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let sql = format!(
            "INSERT INTO employees (card_number_id, first_name, last_name, warehouse_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(&employee.card_number_id)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(employee.warehouse_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    async fn get_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!(
            "UPDATE employees SET card_number_id = $1, first_name = $2, last_name = $3, warehouse_id = $4 \
             WHERE id = $5 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = employee.id, "query");
        sqlx::query_as(&sql)
            .bind(&employee.card_number_id)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(employee.warehouse_id)
            .bind(employee.id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "DELETE FROM employees WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error> {
        let sql = "SELECT EXISTS(SELECT 1 FROM employees WHERE card_number_id = $1)";
        tracing::debug!(sql = %sql, card_number_id, "query");
        sqlx::query_scalar(sql).bind(card_number_id).fetch_one(&self.pool).await
    }

    async fn count_inbound_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<EmployeeInboundOrdersReport>, sqlx::Error> {
        let sql = r#"
            SELECT e.id, e.card_number_id, e.first_name, e.last_name, e.warehouse_id,
                   COUNT(io.id) AS inbound_orders_count
            FROM employees e
            LEFT JOIN inbound_orders io ON io.employee_id = e.id
            WHERE $1::BIGINT IS NULL OR e.id = $1
            GROUP BY e.id
            ORDER BY e.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await
    }
}
