//! Section rules: unique number, existing warehouse, capacity bounds after merge.

use super::{single_owner, CrudService};
use crate::error::AppError;
use crate::model::{CreateSection, Section, SectionProductsReport, UpdateSection};
use crate::repository::{SectionRepository, WarehouseRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("section {0} not found")]
    NotFound(i64),
    #[error("section number {0} already exists")]
    NumberTaken(i64),
    #[error("warehouse {0} does not exist")]
    WarehouseMissing(i64),
    #[error("section {0} still holds product batches")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<SectionError> for AppError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::NotFound(_) => AppError::NotFound(err.to_string()),
            SectionError::NumberTaken(_)
            | SectionError::WarehouseMissing(_)
            | SectionError::InUse(_) => AppError::Conflict(err.to_string()),
            SectionError::Validation(e) => AppError::Validation(e.0),
            SectionError::Store(e) => AppError::Db(e),
        }
    }
}

impl SectionError {
    fn from_write(err: sqlx::Error, section_number: i64, warehouse_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => SectionError::NumberTaken(section_number),
            Some(Violation::ForeignKey) => SectionError::WarehouseMissing(warehouse_id),
            None => SectionError::Store(err),
        }
    }
}

pub struct SectionService {
    repo: Arc<dyn SectionRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

impl SectionService {
    pub fn new(repo: Arc<dyn SectionRepository>, warehouses: Arc<dyn WarehouseRepository>) -> Self {
        SectionService { repo, warehouses }
    }

    async fn require_warehouse(&self, warehouse_id: i64) -> Result<(), SectionError> {
        if !self.warehouses.exists(warehouse_id).await? {
            return Err(SectionError::WarehouseMissing(warehouse_id));
        }
        Ok(())
    }

    /// Product batches stored per section.
    pub async fn report_products(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<SectionProductsReport>, SectionError> {
        let rows = self.repo.count_products(id).await?;
        single_owner(rows, id).ok_or(SectionError::NotFound(id.unwrap_or_default()))
    }
}

#[async_trait]
impl CrudService for SectionService {
    type Entity = Section;
    type Create = CreateSection;
    type Update = UpdateSection;
    type Error = SectionError;

    async fn create(&self, request: CreateSection) -> Result<Section, SectionError> {
        request.validate()?;
        if self.repo.exists_number(request.section_number).await? {
            return Err(SectionError::NumberTaken(request.section_number));
        }
        self.require_warehouse(request.warehouse_id).await?;
        let section = self.repo.create(&request).await.map_err(|e| {
            SectionError::from_write(e, request.section_number, request.warehouse_id)
        })?;
        tracing::info!(id = section.id, section_number = section.section_number, "section created");
        Ok(section)
    }

    async fn get(&self, id: i64) -> Result<Section, SectionError> {
        self.repo.get(id).await?.ok_or(SectionError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Section>, SectionError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateSection) -> Result<Section, SectionError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        merged.validate_capacities()?;
        if merged.section_number != current.section_number
            && self.repo.exists_number(merged.section_number).await?
        {
            return Err(SectionError::NumberTaken(merged.section_number));
        }
        if merged.warehouse_id != current.warehouse_id {
            self.require_warehouse(merged.warehouse_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| SectionError::from_write(e, merged.section_number, merged.warehouse_id))?
            .ok_or(SectionError::NotFound(id))?;
        tracing::info!(id, "section updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), SectionError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => SectionError::InUse(id),
            _ => SectionError::Store(e),
        })?;
        if removed == 0 {
            return Err(SectionError::NotFound(id));
        }
        tracing::info!(id, "section deleted");
        Ok(())
    }
}
