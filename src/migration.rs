//! Create the warehouse schema. Tables are created in foreign-key dependency order and every
//! statement is idempotent, so this runs on every startup.
//!
//! Business keys carry `UNIQUE` and references carry `REFERENCES`: the store is the authority
//! for both invariants, the service checks only produce friendlier errors.

use crate::error::AppError;
use sqlx::PgPool;

const TABLES: &[(&str, &str)] = &[
    (
        "localities",
        r#"
        CREATE TABLE IF NOT EXISTS localities (
            id BIGSERIAL PRIMARY KEY,
            locality_name TEXT NOT NULL,
            province_name TEXT NOT NULL,
            country_name TEXT NOT NULL,
            UNIQUE (locality_name, province_name, country_name)
        )
        "#,
    ),
    (
        "sellers",
        r#"
        CREATE TABLE IF NOT EXISTS sellers (
            id BIGSERIAL PRIMARY KEY,
            cid BIGINT NOT NULL UNIQUE,
            company_name TEXT NOT NULL,
            address TEXT NOT NULL,
            telephone TEXT NOT NULL,
            locality_id BIGINT NOT NULL REFERENCES localities (id)
        )
        "#,
    ),
    (
        "warehouses",
        r#"
        CREATE TABLE IF NOT EXISTS warehouses (
            id BIGSERIAL PRIMARY KEY,
            warehouse_code TEXT NOT NULL UNIQUE,
            address TEXT NOT NULL,
            telephone TEXT NOT NULL,
            minimum_capacity INTEGER NOT NULL,
            minimum_temperature DOUBLE PRECISION NOT NULL,
            locality_id BIGINT NOT NULL REFERENCES localities (id)
        )
        "#,
    ),
    (
        "sections",
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id BIGSERIAL PRIMARY KEY,
            section_number BIGINT NOT NULL UNIQUE,
            current_temperature DOUBLE PRECISION NOT NULL,
            minimum_temperature DOUBLE PRECISION NOT NULL,
            current_capacity INTEGER NOT NULL,
            minimum_capacity INTEGER NOT NULL,
            maximum_capacity INTEGER NOT NULL,
            warehouse_id BIGINT NOT NULL REFERENCES warehouses (id),
            product_type_id BIGINT NOT NULL
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            product_code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            width DOUBLE PRECISION NOT NULL,
            height DOUBLE PRECISION NOT NULL,
            length DOUBLE PRECISION NOT NULL,
            net_weight DOUBLE PRECISION NOT NULL,
            expiration_rate DOUBLE PRECISION NOT NULL,
            recommended_freezing_temperature DOUBLE PRECISION NOT NULL,
            freezing_rate DOUBLE PRECISION NOT NULL,
            product_type_id BIGINT NOT NULL,
            seller_id BIGINT NOT NULL REFERENCES sellers (id)
        )
        "#,
    ),
    (
        "product_records",
        r#"
        CREATE TABLE IF NOT EXISTS product_records (
            id BIGSERIAL PRIMARY KEY,
            last_update_date TIMESTAMP NOT NULL,
            purchase_price DOUBLE PRECISION NOT NULL,
            sale_price DOUBLE PRECISION NOT NULL,
            product_id BIGINT NOT NULL REFERENCES products (id)
        )
        "#,
    ),
    (
        "product_batches",
        r#"
        CREATE TABLE IF NOT EXISTS product_batches (
            id BIGSERIAL PRIMARY KEY,
            batch_number BIGINT NOT NULL UNIQUE,
            current_quantity INTEGER NOT NULL,
            current_temperature DOUBLE PRECISION NOT NULL,
            due_date DATE NOT NULL,
            initial_quantity INTEGER NOT NULL,
            manufacturing_date DATE NOT NULL,
            manufacturing_hour INTEGER NOT NULL,
            minimum_temperature DOUBLE PRECISION NOT NULL,
            product_id BIGINT NOT NULL REFERENCES products (id),
            section_id BIGINT NOT NULL REFERENCES sections (id)
        )
        "#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id BIGSERIAL PRIMARY KEY,
            card_number_id TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            warehouse_id BIGINT NOT NULL REFERENCES warehouses (id)
        )
        "#,
    ),
    (
        "inbound_orders",
        r#"
        CREATE TABLE IF NOT EXISTS inbound_orders (
            id BIGSERIAL PRIMARY KEY,
            order_date DATE NOT NULL,
            order_number TEXT NOT NULL UNIQUE,
            employee_id BIGINT NOT NULL REFERENCES employees (id),
            product_batch_id BIGINT NOT NULL REFERENCES product_batches (id),
            warehouse_id BIGINT NOT NULL REFERENCES warehouses (id)
        )
        "#,
    ),
    (
        "buyers",
        r#"
        CREATE TABLE IF NOT EXISTS buyers (
            id BIGSERIAL PRIMARY KEY,
            card_number_id TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "carriers",
        r#"
        CREATE TABLE IF NOT EXISTS carriers (
            id BIGSERIAL PRIMARY KEY,
            cid TEXT NOT NULL UNIQUE,
            company_name TEXT NOT NULL,
            address TEXT NOT NULL,
            telephone TEXT NOT NULL,
            locality_id BIGINT NOT NULL REFERENCES localities (id)
        )
        "#,
    ),
    (
        "purchase_orders",
        r#"
        CREATE TABLE IF NOT EXISTS purchase_orders (
            id BIGSERIAL PRIMARY KEY,
            order_number TEXT NOT NULL UNIQUE,
            order_date DATE NOT NULL,
            tracking_code TEXT NOT NULL,
            buyer_id BIGINT NOT NULL REFERENCES buyers (id),
            product_record_id BIGINT NOT NULL REFERENCES product_records (id),
            order_status_id BIGINT NOT NULL
        )
        "#,
    ),
];

/// Apply the schema inside one transaction so a partial schema is never left behind.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for (table, ddl) in TABLES {
        tracing::debug!(table = %table, "ensuring table");
        sqlx::query(*ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_created_after_their_references() {
        for (position, (table, ddl)) in TABLES.iter().enumerate() {
            for (referenced, _) in TABLES {
                if ddl.contains(&format!("REFERENCES {} (id)", referenced)) {
                    let referenced_position = TABLES.iter().position(|(t, _)| t == referenced).unwrap();
                    assert!(
                        referenced_position < position,
                        "{} references {} before it exists",
                        table,
                        referenced
                    );
                }
            }
        }
    }

    #[test]
    fn every_table_is_declared_once() {
        let mut names: Vec<&str> = TABLES.iter().map(|(t, _)| *t).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }
}
