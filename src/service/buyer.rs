//! Buyer rules: unique card number, purchase-order report.

use super::{single_owner, CrudService};
use crate::error::AppError;
use crate::model::{Buyer, BuyerPurchaseOrdersReport, CreateBuyer, UpdateBuyer};
use crate::repository::BuyerRepository;
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuyerError {
    #[error("buyer {0} not found")]
    NotFound(i64),
    #[error("card number {0} already exists")]
    CardNumberTaken(String),
    #[error("buyer {0} still has purchase orders")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<BuyerError> for AppError {
    fn from(err: BuyerError) -> Self {
        match err {
            BuyerError::NotFound(_) => AppError::NotFound(err.to_string()),
            BuyerError::CardNumberTaken(_) | BuyerError::InUse(_) => AppError::Conflict(err.to_string()),
            BuyerError::Validation(e) => AppError::Validation(e.0),
            BuyerError::Store(e) => AppError::Db(e),
        }
    }
}

pub struct BuyerService {
    repo: Arc<dyn BuyerRepository>,
}

impl BuyerService {
    pub fn new(repo: Arc<dyn BuyerRepository>) -> Self {
        BuyerService { repo }
    }

    pub async fn report_purchase_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<BuyerPurchaseOrdersReport>, BuyerError> {
        let rows = self.repo.count_purchase_orders(id).await?;
        single_owner(rows, id).ok_or(BuyerError::NotFound(id.unwrap_or_default()))
    }
}

#[async_trait]
impl CrudService for BuyerService {
    type Entity = Buyer;
    type Create = CreateBuyer;
    type Update = UpdateBuyer;
    type Error = BuyerError;

    async fn create(&self, request: CreateBuyer) -> Result<Buyer, BuyerError> {
        request.validate()?;
        if self.repo.exists_card_number(&request.card_number_id).await? {
            return Err(BuyerError::CardNumberTaken(request.card_number_id));
        }
        let buyer = self.repo.create(&request).await.map_err(|e| match store::violation(&e) {
            Some(Violation::Unique) => BuyerError::CardNumberTaken(request.card_number_id.clone()),
            _ => BuyerError::Store(e),
        })?;
        tracing::info!(id = buyer.id, "buyer created");
        Ok(buyer)
    }

    async fn get(&self, id: i64) -> Result<Buyer, BuyerError> {
        self.repo.get(id).await?.ok_or(BuyerError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Buyer>, BuyerError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateBuyer) -> Result<Buyer, BuyerError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.card_number_id != current.card_number_id
            && self.repo.exists_card_number(&merged.card_number_id).await?
        {
            return Err(BuyerError::CardNumberTaken(merged.card_number_id));
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| match store::violation(&e) {
                Some(Violation::Unique) => BuyerError::CardNumberTaken(merged.card_number_id.clone()),
                _ => BuyerError::Store(e),
            })?
            .ok_or(BuyerError::NotFound(id))?;
        tracing::info!(id, "buyer updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), BuyerError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => BuyerError::InUse(id),
            _ => BuyerError::Store(e),
        })?;
        if removed == 0 {
            return Err(BuyerError::NotFound(id));
        }
        tracing::info!(id, "buyer deleted");
        Ok(())
    }
}
