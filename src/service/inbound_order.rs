//! Inbound order rules: unique order number; employee, batch and warehouse must exist.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreateInboundOrder, InboundOrder, UpdateInboundOrder};
use crate::repository::{
    EmployeeRepository, InboundOrderRepository, ProductBatchRepository, WarehouseRepository,
};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InboundOrderError {
    #[error("inbound order {0} not found")]
    NotFound(i64),
    #[error("order number {0} already exists")]
    OrderNumberTaken(String),
    #[error("employee {0} does not exist")]
    EmployeeMissing(i64),
    #[error("product batch {0} does not exist")]
    ProductBatchMissing(i64),
    #[error("warehouse {0} does not exist")]
    WarehouseMissing(i64),
    #[error("employee, product batch or warehouse referenced by the order does not exist")]
    ReferenceMissing,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<InboundOrderError> for AppError {
    fn from(err: InboundOrderError) -> Self {
        match err {
            InboundOrderError::NotFound(_) => AppError::NotFound(err.to_string()),
            InboundOrderError::OrderNumberTaken(_)
            | InboundOrderError::EmployeeMissing(_)
            | InboundOrderError::ProductBatchMissing(_)
            | InboundOrderError::WarehouseMissing(_)
            | InboundOrderError::ReferenceMissing => AppError::Conflict(err.to_string()),
            InboundOrderError::Validation(e) => AppError::Validation(e.0),
            InboundOrderError::Store(e) => AppError::Db(e),
        }
    }
}

impl InboundOrderError {
    fn from_write(err: sqlx::Error, order_number: &str) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => InboundOrderError::OrderNumberTaken(order_number.to_string()),
            Some(Violation::ForeignKey) => InboundOrderError::ReferenceMissing,
            None => InboundOrderError::Store(err),
        }
    }
}

pub struct InboundOrderService {
    repo: Arc<dyn InboundOrderRepository>,
    employees: Arc<dyn EmployeeRepository>,
    product_batches: Arc<dyn ProductBatchRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

impl InboundOrderService {
    pub fn new(
        repo: Arc<dyn InboundOrderRepository>,
        employees: Arc<dyn EmployeeRepository>,
        product_batches: Arc<dyn ProductBatchRepository>,
        warehouses: Arc<dyn WarehouseRepository>,
    ) -> Self {
        InboundOrderService {
            repo,
            employees,
            product_batches,
            warehouses,
        }
    }

    /// Check the references of `order` that differ from `current` (all of them on create).
    async fn require_references(
        &self,
        order: &InboundOrder,
        current: Option<&InboundOrder>,
    ) -> Result<(), InboundOrderError> {
        let changed = |pick: fn(&InboundOrder) -> i64| current.map_or(true, |c| pick(c) != pick(order));
        if changed(|o| o.employee_id) && !self.employees.exists(order.employee_id).await? {
            return Err(InboundOrderError::EmployeeMissing(order.employee_id));
        }
        if changed(|o| o.product_batch_id)
            && !self.product_batches.exists(order.product_batch_id).await?
        {
            return Err(InboundOrderError::ProductBatchMissing(order.product_batch_id));
        }
        if changed(|o| o.warehouse_id) && !self.warehouses.exists(order.warehouse_id).await? {
            return Err(InboundOrderError::WarehouseMissing(order.warehouse_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for InboundOrderService {
    type Entity = InboundOrder;
    type Create = CreateInboundOrder;
    type Update = UpdateInboundOrder;
    type Error = InboundOrderError;

    async fn create(&self, request: CreateInboundOrder) -> Result<InboundOrder, InboundOrderError> {
        request.validate()?;
        if self.repo.exists_order_number(&request.order_number).await? {
            return Err(InboundOrderError::OrderNumberTaken(request.order_number));
        }
        let candidate = InboundOrder {
            id: 0,
            order_date: request.order_date,
            order_number: request.order_number.clone(),
            employee_id: request.employee_id,
            product_batch_id: request.product_batch_id,
            warehouse_id: request.warehouse_id,
        };
        self.require_references(&candidate, None).await?;
        let order = self
            .repo
            .create(&request)
            .await
            .map_err(|e| InboundOrderError::from_write(e, &request.order_number))?;
        tracing::info!(id = order.id, order_number = %order.order_number, "inbound order created");
        Ok(order)
    }

    async fn get(&self, id: i64) -> Result<InboundOrder, InboundOrderError> {
        self.repo.get(id).await?.ok_or(InboundOrderError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<InboundOrder>, InboundOrderError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(
        &self,
        id: i64,
        request: UpdateInboundOrder,
    ) -> Result<InboundOrder, InboundOrderError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.order_number != current.order_number
            && self.repo.exists_order_number(&merged.order_number).await?
        {
            return Err(InboundOrderError::OrderNumberTaken(merged.order_number));
        }
        self.require_references(&merged, Some(&current)).await?;
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| InboundOrderError::from_write(e, &merged.order_number))?
            .ok_or(InboundOrderError::NotFound(id))?;
        tracing::info!(id, "inbound order updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), InboundOrderError> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            return Err(InboundOrderError::NotFound(id));
        }
        tracing::info!(id, "inbound order deleted");
        Ok(())
    }
}
