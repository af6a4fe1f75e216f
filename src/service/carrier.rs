//! Carrier rules: unique cid, existing locality.

use super::CrudService;
use crate::error::AppError;
use crate::model::{Carrier, CreateCarrier, UpdateCarrier};
use crate::repository::{CarrierRepository, LocalityRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("carrier {0} not found")]
    NotFound(i64),
    #[error("carrier with cid {0} already exists")]
    CidTaken(String),
    #[error("locality {0} does not exist")]
    LocalityMissing(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<CarrierError> for AppError {
    fn from(err: CarrierError) -> Self {
        match err {
            CarrierError::NotFound(_) => AppError::NotFound(err.to_string()),
            CarrierError::CidTaken(_) | CarrierError::LocalityMissing(_) => {
                AppError::Conflict(err.to_string())
            }
            CarrierError::Validation(e) => AppError::Validation(e.0),
            CarrierError::Store(e) => AppError::Db(e),
        }
    }
}

impl CarrierError {
    fn from_write(err: sqlx::Error, cid: &str, locality_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => CarrierError::CidTaken(cid.to_string()),
            Some(Violation::ForeignKey) => CarrierError::LocalityMissing(locality_id),
            None => CarrierError::Store(err),
        }
    }
}

/// Carriers per locality are reported by [`LocalityService`](super::LocalityService).
pub struct CarrierService {
    repo: Arc<dyn CarrierRepository>,
    localities: Arc<dyn LocalityRepository>,
}

impl CarrierService {
    pub fn new(repo: Arc<dyn CarrierRepository>, localities: Arc<dyn LocalityRepository>) -> Self {
        CarrierService { repo, localities }
    }

    async fn require_locality(&self, locality_id: i64) -> Result<(), CarrierError> {
        if !self.localities.exists(locality_id).await? {
            return Err(CarrierError::LocalityMissing(locality_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for CarrierService {
    type Entity = Carrier;
    type Create = CreateCarrier;
    type Update = UpdateCarrier;
    type Error = CarrierError;

    async fn create(&self, request: CreateCarrier) -> Result<Carrier, CarrierError> {
        request.validate()?;
        if self.repo.exists_cid(&request.cid).await? {
            return Err(CarrierError::CidTaken(request.cid));
        }
        self.require_locality(request.locality_id).await?;
        let carrier = self
            .repo
            .create(&request)
            .await
            .map_err(|e| CarrierError::from_write(e, &request.cid, request.locality_id))?;
        tracing::info!(id = carrier.id, cid = %carrier.cid, "carrier created");
        Ok(carrier)
    }

    async fn get(&self, id: i64) -> Result<Carrier, CarrierError> {
        self.repo.get(id).await?.ok_or(CarrierError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Carrier>, CarrierError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateCarrier) -> Result<Carrier, CarrierError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.cid != current.cid && self.repo.exists_cid(&merged.cid).await? {
            return Err(CarrierError::CidTaken(merged.cid));
        }
        if merged.locality_id != current.locality_id {
            self.require_locality(merged.locality_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| CarrierError::from_write(e, &merged.cid, merged.locality_id))?
            .ok_or(CarrierError::NotFound(id))?;
        tracing::info!(id, "carrier updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), CarrierError> {
        if self.repo.delete(id).await? == 0 {
            return Err(CarrierError::NotFound(id));
        }
        tracing::info!(id, "carrier deleted");
        Ok(())
    }
}
