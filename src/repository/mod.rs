//! Data access. One trait per entity so services can be tested without a database;
//! the `Pg*` implementations issue parameterized SQL against the shared pool and return
//! driver errors unmodified.

mod buyer;
mod carrier;
mod employee;
mod inbound_order;
mod locality;
#[cfg(test)]
pub(crate) mod memory;
mod product;
mod product_batch;
mod product_record;
mod purchase_order;
mod section;
mod seller;
mod warehouse;

pub use buyer::{BuyerRepository, PgBuyerRepository};
pub use carrier::{CarrierRepository, PgCarrierRepository};
pub use employee::{EmployeeRepository, PgEmployeeRepository};
pub use inbound_order::{InboundOrderRepository, PgInboundOrderRepository};
pub use locality::{LocalityRepository, PgLocalityRepository};
pub use product::{PgProductRepository, ProductRepository};
pub use product_batch::{PgProductBatchRepository, ProductBatchRepository};
pub use product_record::{PgProductRecordRepository, ProductRecordRepository};
pub use purchase_order::{PgPurchaseOrderRepository, PurchaseOrderRepository};
pub use section::{PgSectionRepository, SectionRepository};
pub use seller::{PgSellerRepository, SellerRepository};
pub use warehouse::{PgWarehouseRepository, WarehouseRepository};

use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repositories {
    pub localities: Arc<dyn LocalityRepository>,
    pub sellers: Arc<dyn SellerRepository>,
    pub warehouses: Arc<dyn WarehouseRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub product_records: Arc<dyn ProductRecordRepository>,
    pub product_batches: Arc<dyn ProductBatchRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub inbound_orders: Arc<dyn InboundOrderRepository>,
    pub buyers: Arc<dyn BuyerRepository>,
    pub carriers: Arc<dyn CarrierRepository>,
    pub purchase_orders: Arc<dyn PurchaseOrderRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: &PgPool) -> Self {
        Repositories {
            localities: Arc::new(PgLocalityRepository::new(pool.clone())),
            sellers: Arc::new(PgSellerRepository::new(pool.clone())),
            warehouses: Arc::new(PgWarehouseRepository::new(pool.clone())),
            sections: Arc::new(PgSectionRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            product_records: Arc::new(PgProductRecordRepository::new(pool.clone())),
            product_batches: Arc::new(PgProductBatchRepository::new(pool.clone())),
            employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
            inbound_orders: Arc::new(PgInboundOrderRepository::new(pool.clone())),
            buyers: Arc::new(PgBuyerRepository::new(pool.clone())),
            carriers: Arc::new(PgCarrierRepository::new(pool.clone())),
            purchase_orders: Arc::new(PgPurchaseOrderRepository::new(pool.clone())),
        }
    }
}
