//! Seller rules: unique cid, existing locality.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreateSeller, Seller, UpdateSeller};
use crate::repository::{LocalityRepository, SellerRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SellerError {
    #[error("seller {0} not found")]
    NotFound(i64),
    #[error("seller with cid {0} already exists")]
    CidTaken(i64),
    #[error("locality {0} does not exist")]
    LocalityMissing(i64),
    #[error("seller {0} still has products")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<SellerError> for AppError {
    fn from(err: SellerError) -> Self {
        match err {
            SellerError::NotFound(_) => AppError::NotFound(err.to_string()),
            SellerError::CidTaken(_) | SellerError::LocalityMissing(_) | SellerError::InUse(_) => {
                AppError::Conflict(err.to_string())
            }
            SellerError::Validation(e) => AppError::Validation(e.0),
            SellerError::Store(e) => AppError::Db(e),
        }
    }
}

impl SellerError {
    fn from_write(err: sqlx::Error, cid: i64, locality_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => SellerError::CidTaken(cid),
            Some(Violation::ForeignKey) => SellerError::LocalityMissing(locality_id),
            None => SellerError::Store(err),
        }
    }
}

pub struct SellerService {
    repo: Arc<dyn SellerRepository>,
    localities: Arc<dyn LocalityRepository>,
}

impl SellerService {
    pub fn new(repo: Arc<dyn SellerRepository>, localities: Arc<dyn LocalityRepository>) -> Self {
        SellerService { repo, localities }
    }

    async fn require_locality(&self, locality_id: i64) -> Result<(), SellerError> {
        if !self.localities.exists(locality_id).await? {
            return Err(SellerError::LocalityMissing(locality_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for SellerService {
    type Entity = Seller;
    type Create = CreateSeller;
    type Update = UpdateSeller;
    type Error = SellerError;

    async fn create(&self, request: CreateSeller) -> Result<Seller, SellerError> {
        request.validate()?;
        if self.repo.exists_cid(request.cid).await? {
            return Err(SellerError::CidTaken(request.cid));
        }
        self.require_locality(request.locality_id).await?;
        let seller = self
            .repo
            .create(&request)
            .await
            .map_err(|e| SellerError::from_write(e, request.cid, request.locality_id))?;
        tracing::info!(id = seller.id, cid = seller.cid, "seller created");
        Ok(seller)
    }

    async fn get(&self, id: i64) -> Result<Seller, SellerError> {
        self.repo.get(id).await?.ok_or(SellerError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Seller>, SellerError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateSeller) -> Result<Seller, SellerError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.cid != current.cid && self.repo.exists_cid(merged.cid).await? {
            return Err(SellerError::CidTaken(merged.cid));
        }
        if merged.locality_id != current.locality_id {
            self.require_locality(merged.locality_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| SellerError::from_write(e, merged.cid, merged.locality_id))?
            .ok_or(SellerError::NotFound(id))?;
        tracing::info!(id, "seller updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), SellerError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => SellerError::InUse(id),
            _ => SellerError::Store(e),
        })?;
        if removed == 0 {
            return Err(SellerError::NotFound(id));
        }
        tracing::info!(id, "seller deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{MemoryLocalities, MemorySellers};

    fn request(cid: i64) -> CreateSeller {
        CreateSeller {
            cid,
            company_name: "Nike".into(),
            address: "Avenida Paulista, 202".into(),
            telephone: "13997780890".into(),
            locality_id: 1,
        }
    }

    fn service() -> SellerService {
        let localities = MemoryLocalities::with_places(&[("São Paulo", "SP", "Brasil")]);
        SellerService::new(Arc::new(MemorySellers::default()), Arc::new(localities))
    }

    #[tokio::test]
    async fn create_assigns_ids_and_rejects_duplicate_cid() {
        let service = service();
        let first = service.create(request(1)).await.unwrap();
        assert_eq!(first.id, 1);
        let second = service.create(request(2)).await.unwrap();
        assert_eq!(second.id, 2);

        let err = service.create(request(1)).await.unwrap_err();
        assert!(matches!(err, SellerError::CidTaken(1)));
    }

    #[tokio::test]
    async fn create_requires_existing_locality() {
        let service = service();
        let mut req = request(1);
        req.locality_id = 99;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, SellerError::LocalityMissing(99)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let service = service();
        let mut req = request(1);
        req.company_name = "".into();
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_merges_and_tolerates_own_cid() {
        let service = service();
        service.create(request(1)).await.unwrap();

        let same = UpdateSeller {
            cid: Some(1),
            ..Default::default()
        };
        let unchanged = service.update(1, same).await.unwrap();
        assert_eq!(unchanged, service.get(1).await.unwrap());

        let updated = service
            .update(
                1,
                UpdateSeller {
                    address: Some("Rua Augusta, 10".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address, "Rua Augusta, 10");
        assert_eq!(updated.company_name, "Nike");
    }

    #[tokio::test]
    async fn update_to_taken_cid_conflicts() {
        let service = service();
        service.create(request(1)).await.unwrap();
        service.create(request(2)).await.unwrap();
        let err = service
            .update(
                2,
                UpdateSeller {
                    cid: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SellerError::CidTaken(1)));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.get(5).await, Err(SellerError::NotFound(5))));
        assert!(matches!(
            service.update(5, UpdateSeller::default()).await,
            Err(SellerError::NotFound(5))
        ));
        assert!(matches!(service.delete(5).await, Err(SellerError::NotFound(5))));
    }

    #[tokio::test]
    async fn delete_removes_the_seller() {
        let service = service();
        service.create(request(1)).await.unwrap();
        service.delete(1).await.unwrap();
        assert!(matches!(service.get(1).await, Err(SellerError::NotFound(1))));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_constraints_map_to_conflicts() {
        let localities = Arc::new(MemoryLocalities::with_places(&[("São Paulo", "SP", "Brasil")]));

        let sellers = MemorySellers::default();
        sellers.rows.reject_writes(Violation::Unique);
        let service = SellerService::new(Arc::new(sellers), localities.clone());
        let err = service.create(request(1)).await.unwrap_err();
        assert!(matches!(err, SellerError::CidTaken(1)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));

        let sellers = MemorySellers::with_ids(&[1]);
        sellers.rows.reject_writes(Violation::ForeignKey);
        let service = SellerService::new(Arc::new(sellers), localities);
        let err = service.delete(1).await.unwrap_err();
        assert!(matches!(err, SellerError::InUse(1)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }
}
