//! Purchase order rules: unique order number, existing buyer and product record.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreatePurchaseOrder, PurchaseOrder, UpdatePurchaseOrder};
use crate::repository::{BuyerRepository, ProductRecordRepository, PurchaseOrderRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurchaseOrderError {
    #[error("purchase order {0} not found")]
    NotFound(i64),
    #[error("order number {0} already exists")]
    OrderNumberTaken(String),
    #[error("buyer {0} does not exist")]
    BuyerMissing(i64),
    #[error("product record {0} does not exist")]
    ProductRecordMissing(i64),
    #[error("buyer or product record referenced by the order does not exist")]
    ReferenceMissing,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<PurchaseOrderError> for AppError {
    fn from(err: PurchaseOrderError) -> Self {
        match err {
            PurchaseOrderError::NotFound(_) => AppError::NotFound(err.to_string()),
            PurchaseOrderError::OrderNumberTaken(_)
            | PurchaseOrderError::BuyerMissing(_)
            | PurchaseOrderError::ProductRecordMissing(_)
            | PurchaseOrderError::ReferenceMissing => AppError::Conflict(err.to_string()),
            PurchaseOrderError::Validation(e) => AppError::Validation(e.0),
            PurchaseOrderError::Store(e) => AppError::Db(e),
        }
    }
}

impl PurchaseOrderError {
    fn from_write(err: sqlx::Error, order_number: &str) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => PurchaseOrderError::OrderNumberTaken(order_number.to_string()),
            Some(Violation::ForeignKey) => PurchaseOrderError::ReferenceMissing,
            None => PurchaseOrderError::Store(err),
        }
    }
}

pub struct PurchaseOrderService {
    repo: Arc<dyn PurchaseOrderRepository>,
    buyers: Arc<dyn BuyerRepository>,
    product_records: Arc<dyn ProductRecordRepository>,
}

impl PurchaseOrderService {
    pub fn new(
        repo: Arc<dyn PurchaseOrderRepository>,
        buyers: Arc<dyn BuyerRepository>,
        product_records: Arc<dyn ProductRecordRepository>,
    ) -> Self {
        PurchaseOrderService {
            repo,
            buyers,
            product_records,
        }
    }

    async fn require_buyer(&self, buyer_id: i64) -> Result<(), PurchaseOrderError> {
        if !self.buyers.exists(buyer_id).await? {
            return Err(PurchaseOrderError::BuyerMissing(buyer_id));
        }
        Ok(())
    }

    async fn require_product_record(&self, product_record_id: i64) -> Result<(), PurchaseOrderError> {
        if !self.product_records.exists(product_record_id).await? {
            return Err(PurchaseOrderError::ProductRecordMissing(product_record_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for PurchaseOrderService {
    type Entity = PurchaseOrder;
    type Create = CreatePurchaseOrder;
    type Update = UpdatePurchaseOrder;
    type Error = PurchaseOrderError;

    async fn create(&self, request: CreatePurchaseOrder) -> Result<PurchaseOrder, PurchaseOrderError> {
        request.validate()?;
        if self.repo.exists_order_number(&request.order_number).await? {
            return Err(PurchaseOrderError::OrderNumberTaken(request.order_number));
        }
        self.require_buyer(request.buyer_id).await?;
        self.require_product_record(request.product_record_id).await?;
        let order = self
            .repo
            .create(&request)
            .await
            .map_err(|e| PurchaseOrderError::from_write(e, &request.order_number))?;
        tracing::info!(id = order.id, order_number = %order.order_number, "purchase order created");
        Ok(order)
    }

    async fn get(&self, id: i64) -> Result<PurchaseOrder, PurchaseOrderError> {
        self.repo.get(id).await?.ok_or(PurchaseOrderError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, PurchaseOrderError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(
        &self,
        id: i64,
        request: UpdatePurchaseOrder,
    ) -> Result<PurchaseOrder, PurchaseOrderError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.order_number != current.order_number
            && self.repo.exists_order_number(&merged.order_number).await?
        {
            return Err(PurchaseOrderError::OrderNumberTaken(merged.order_number));
        }
        if merged.buyer_id != current.buyer_id {
            self.require_buyer(merged.buyer_id).await?;
        }
        if merged.product_record_id != current.product_record_id {
            self.require_product_record(merged.product_record_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| PurchaseOrderError::from_write(e, &merged.order_number))?
            .ok_or(PurchaseOrderError::NotFound(id))?;
        tracing::info!(id, "purchase order updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), PurchaseOrderError> {
        if self.repo.delete(id).await? == 0 {
            return Err(PurchaseOrderError::NotFound(id));
        }
        tracing::info!(id, "purchase order deleted");
        Ok(())
    }
}
