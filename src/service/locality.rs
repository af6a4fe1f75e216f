//! Locality rules: one row per (locality, province, country), plus the two locality reports.

use super::{single_owner, CrudService};
use crate::error::AppError;
use crate::model::{CreateLocality, Locality, LocalityCarriersReport, LocalitySellersReport, UpdateLocality};
use crate::repository::LocalityRepository;
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocalityError {
    #[error("locality {0} not found")]
    NotFound(i64),
    #[error("locality {0} already exists")]
    AlreadyExists(String),
    #[error("locality {0} still has sellers or carriers")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<LocalityError> for AppError {
    fn from(err: LocalityError) -> Self {
        match err {
            LocalityError::NotFound(_) => AppError::NotFound(err.to_string()),
            LocalityError::AlreadyExists(_) | LocalityError::InUse(_) => {
                AppError::Conflict(err.to_string())
            }
            LocalityError::Validation(e) => AppError::Validation(e.0),
            LocalityError::Store(e) => AppError::Db(e),
        }
    }
}

fn place(name: &str, province: &str, country: &str) -> String {
    format!("{} ({}, {})", name, province, country)
}

pub struct LocalityService {
    repo: Arc<dyn LocalityRepository>,
}

impl LocalityService {
    pub fn new(repo: Arc<dyn LocalityRepository>) -> Self {
        LocalityService { repo }
    }

    pub async fn report_sellers(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<LocalitySellersReport>, LocalityError> {
        let rows = self.repo.count_sellers(id).await?;
        single_owner(rows, id).ok_or(LocalityError::NotFound(id.unwrap_or_default()))
    }

    pub async fn report_carriers(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<LocalityCarriersReport>, LocalityError> {
        let rows = self.repo.count_carriers(id).await?;
        single_owner(rows, id).ok_or(LocalityError::NotFound(id.unwrap_or_default()))
    }
}

#[async_trait]
impl CrudService for LocalityService {
    type Entity = Locality;
    type Create = CreateLocality;
    type Update = UpdateLocality;
    type Error = LocalityError;

    async fn create(&self, request: CreateLocality) -> Result<Locality, LocalityError> {
        request.validate()?;
        let taken = self
            .repo
            .exists_place(&request.locality_name, &request.province_name, &request.country_name)
            .await?;
        if taken {
            return Err(LocalityError::AlreadyExists(place(
                &request.locality_name,
                &request.province_name,
                &request.country_name,
            )));
        }
        let locality = self.repo.create(&request).await.map_err(|e| match store::violation(&e) {
            Some(Violation::Unique) => LocalityError::AlreadyExists(place(
                &request.locality_name,
                &request.province_name,
                &request.country_name,
            )),
            _ => LocalityError::Store(e),
        })?;
        tracing::info!(id = locality.id, "locality created");
        Ok(locality)
    }

    async fn get(&self, id: i64) -> Result<Locality, LocalityError> {
        self.repo.get(id).await?.ok_or(LocalityError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Locality>, LocalityError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateLocality) -> Result<Locality, LocalityError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        let label = place(&merged.locality_name, &merged.province_name, &merged.country_name);
        if !merged.same_place(&current)
            && self
                .repo
                .exists_place(&merged.locality_name, &merged.province_name, &merged.country_name)
                .await?
        {
            return Err(LocalityError::AlreadyExists(label));
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| match store::violation(&e) {
                Some(Violation::Unique) => LocalityError::AlreadyExists(label),
                _ => LocalityError::Store(e),
            })?
            .ok_or(LocalityError::NotFound(id))?;
        tracing::info!(id, "locality updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), LocalityError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => LocalityError::InUse(id),
            _ => LocalityError::Store(e),
        })?;
        if removed == 0 {
            return Err(LocalityError::NotFound(id));
        }
        tracing::info!(id, "locality deleted");
        Ok(())
    }
}
