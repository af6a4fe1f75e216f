//! Warehouse rules: unique code, existing locality.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreateWarehouse, UpdateWarehouse, Warehouse};
use crate::repository::{LocalityRepository, WarehouseRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("warehouse {0} not found")]
    NotFound(i64),
    #[error("warehouse code {0} already exists")]
    CodeTaken(String),
    #[error("locality {0} does not exist")]
    LocalityMissing(i64),
    #[error("warehouse {0} still has sections, employees or inbound orders")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<WarehouseError> for AppError {
    fn from(err: WarehouseError) -> Self {
        match err {
            WarehouseError::NotFound(_) => AppError::NotFound(err.to_string()),
            WarehouseError::CodeTaken(_)
            | WarehouseError::LocalityMissing(_)
            | WarehouseError::InUse(_) => AppError::Conflict(err.to_string()),
            WarehouseError::Validation(e) => AppError::Validation(e.0),
            WarehouseError::Store(e) => AppError::Db(e),
        }
    }
}

impl WarehouseError {
    fn from_write(err: sqlx::Error, code: &str, locality_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => WarehouseError::CodeTaken(code.to_string()),
            Some(Violation::ForeignKey) => WarehouseError::LocalityMissing(locality_id),
            None => WarehouseError::Store(err),
        }
    }
}

pub struct WarehouseService {
    repo: Arc<dyn WarehouseRepository>,
    localities: Arc<dyn LocalityRepository>,
}

impl WarehouseService {
    pub fn new(
        repo: Arc<dyn WarehouseRepository>,
        localities: Arc<dyn LocalityRepository>,
    ) -> Self {
        WarehouseService { repo, localities }
    }

    async fn require_locality(&self, locality_id: i64) -> Result<(), WarehouseError> {
        if !self.localities.exists(locality_id).await? {
            return Err(WarehouseError::LocalityMissing(locality_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for WarehouseService {
    type Entity = Warehouse;
    type Create = CreateWarehouse;
    type Update = UpdateWarehouse;
    type Error = WarehouseError;

    async fn create(&self, request: CreateWarehouse) -> Result<Warehouse, WarehouseError> {
        request.validate()?;
        if self.repo.exists_code(&request.warehouse_code).await? {
            return Err(WarehouseError::CodeTaken(request.warehouse_code));
        }
        self.require_locality(request.locality_id).await?;
        let warehouse = self.repo.create(&request).await.map_err(|e| {
            WarehouseError::from_write(e, &request.warehouse_code, request.locality_id)
        })?;
        tracing::info!(id = warehouse.id, code = %warehouse.warehouse_code, "warehouse created");
        Ok(warehouse)
    }

    async fn get(&self, id: i64) -> Result<Warehouse, WarehouseError> {
        self.repo.get(id).await?.ok_or(WarehouseError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Warehouse>, WarehouseError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateWarehouse) -> Result<Warehouse, WarehouseError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.warehouse_code != current.warehouse_code
            && self.repo.exists_code(&merged.warehouse_code).await?
        {
            return Err(WarehouseError::CodeTaken(merged.warehouse_code));
        }
        if merged.locality_id != current.locality_id {
            self.require_locality(merged.locality_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| WarehouseError::from_write(e, &merged.warehouse_code, merged.locality_id))?
            .ok_or(WarehouseError::NotFound(id))?;
        tracing::info!(id, "warehouse updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), WarehouseError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => WarehouseError::InUse(id),
            _ => WarehouseError::Store(e),
        })?;
        if removed == 0 {
            return Err(WarehouseError::NotFound(id));
        }
        tracing::info!(id, "warehouse deleted");
        Ok(())
    }
}
