//! Business rules per entity. Services own the existence and uniqueness checks and translate
//! store failures into their module error; handlers only see `Result<_, impl Into<AppError>>`.

mod buyer;
mod carrier;
mod employee;
mod inbound_order;
mod locality;
mod product;
mod product_batch;
mod product_record;
mod purchase_order;
mod section;
mod seller;
pub mod validation;
mod warehouse;

pub use buyer::{BuyerError, BuyerService};
pub use carrier::{CarrierError, CarrierService};
pub use employee::{EmployeeError, EmployeeService};
pub use inbound_order::{InboundOrderError, InboundOrderService};
pub use locality::{LocalityError, LocalityService};
pub use product::{ProductError, ProductService};
pub use product_batch::{ProductBatchError, ProductBatchService};
pub use product_record::{ProductRecordError, ProductRecordService};
pub use purchase_order::{PurchaseOrderError, PurchaseOrderService};
pub use section::{SectionError, SectionService};
pub use seller::{SellerError, SellerService};
pub use warehouse::{WarehouseError, WarehouseService};

use crate::error::AppError;
use crate::repository::Repositories;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// The five operations every entity group exposes over HTTP.
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    type Entity: Serialize + Send + 'static;
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;
    type Error: Into<AppError> + Send + 'static;

    async fn create(&self, request: Self::Create) -> Result<Self::Entity, Self::Error>;
    async fn get(&self, id: i64) -> Result<Self::Entity, Self::Error>;
    async fn get_all(&self) -> Result<Vec<Self::Entity>, Self::Error>;
    /// Merge the present fields of `request` into the stored record.
    async fn update(&self, id: i64, request: Self::Update) -> Result<Self::Entity, Self::Error>;
    async fn delete(&self, id: i64) -> Result<(), Self::Error>;
}

/// Every service, wired to one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub localities: Arc<LocalityService>,
    pub sellers: Arc<SellerService>,
    pub warehouses: Arc<WarehouseService>,
    pub sections: Arc<SectionService>,
    pub products: Arc<ProductService>,
    pub product_records: Arc<ProductRecordService>,
    pub product_batches: Arc<ProductBatchService>,
    pub employees: Arc<EmployeeService>,
    pub inbound_orders: Arc<InboundOrderService>,
    pub buyers: Arc<BuyerService>,
    pub carriers: Arc<CarrierService>,
    pub purchase_orders: Arc<PurchaseOrderService>,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Services {
            localities: Arc::new(LocalityService::new(repos.localities.clone())),
            sellers: Arc::new(SellerService::new(
                repos.sellers.clone(),
                repos.localities.clone(),
            )),
            warehouses: Arc::new(WarehouseService::new(
                repos.warehouses.clone(),
                repos.localities.clone(),
            )),
            sections: Arc::new(SectionService::new(
                repos.sections.clone(),
                repos.warehouses.clone(),
            )),
            products: Arc::new(ProductService::new(
                repos.products.clone(),
                repos.sellers.clone(),
            )),
            product_records: Arc::new(ProductRecordService::new(
                repos.product_records.clone(),
                repos.products.clone(),
            )),
            product_batches: Arc::new(ProductBatchService::new(
                repos.product_batches.clone(),
                repos.products.clone(),
                repos.sections.clone(),
            )),
            employees: Arc::new(EmployeeService::new(
                repos.employees.clone(),
                repos.warehouses.clone(),
            )),
            inbound_orders: Arc::new(InboundOrderService::new(
                repos.inbound_orders.clone(),
                repos.employees.clone(),
                repos.product_batches.clone(),
                repos.warehouses.clone(),
            )),
            buyers: Arc::new(BuyerService::new(repos.buyers.clone())),
            carriers: Arc::new(CarrierService::new(
                repos.carriers.clone(),
                repos.localities.clone(),
            )),
            purchase_orders: Arc::new(PurchaseOrderService::new(
                repos.purchase_orders.clone(),
                repos.buyers.clone(),
                repos.product_records.clone(),
            )),
        }
    }
}

/// Narrow an aggregation to the requested owner; an unknown owner yields no row.
pub(crate) fn single_owner<T>(rows: Vec<T>, filter: Option<i64>) -> Option<Vec<T>> {
    match filter {
        Some(_) if rows.is_empty() => None,
        _ => Some(rows),
    }
}
