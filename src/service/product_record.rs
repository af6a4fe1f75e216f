//! Product record rules.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreateProductRecord, ProductRecord, UpdateProductRecord};
use crate::repository::{ProductRecordRepository, ProductRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductRecordError {
    #[error("product record {0} not found")]
    NotFound(i64),
    #[error("product {0} does not exist")]
    ProductMissing(i64),
    #[error("product record {0} is still referenced by purchase orders")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<ProductRecordError> for AppError {
    fn from(err: ProductRecordError) -> Self {
        match err {
            ProductRecordError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductRecordError::ProductMissing(_) | ProductRecordError::InUse(_) => {
                AppError::Conflict(err.to_string())
            }
            ProductRecordError::Validation(e) => AppError::Validation(e.0),
            ProductRecordError::Store(e) => AppError::Db(e),
        }
    }
}

impl ProductRecordError {
    fn from_write(err: sqlx::Error, product_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::ForeignKey) => ProductRecordError::ProductMissing(product_id),
            _ => ProductRecordError::Store(err),
        }
    }
}

/// Price history. Records have no business key, only the product reference.
pub struct ProductRecordService {
    repo: Arc<dyn ProductRecordRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ProductRecordService {
    pub fn new(
        repo: Arc<dyn ProductRecordRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        ProductRecordService { repo, products }
    }

    async fn require_product(&self, product_id: i64) -> Result<(), ProductRecordError> {
        if !self.products.exists(product_id).await? {
            return Err(ProductRecordError::ProductMissing(product_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for ProductRecordService {
    type Entity = ProductRecord;
    type Create = CreateProductRecord;
    type Update = UpdateProductRecord;
    type Error = ProductRecordError;

    async fn create(&self, request: CreateProductRecord) -> Result<ProductRecord, ProductRecordError> {
        request.validate()?;
        self.require_product(request.product_id).await?;
        let record = self
            .repo
            .create(&request)
            .await
            .map_err(|e| ProductRecordError::from_write(e, request.product_id))?;
        tracing::info!(id = record.id, product_id = record.product_id, "product record created");
        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<ProductRecord, ProductRecordError> {
        self.repo.get(id).await?.ok_or(ProductRecordError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<ProductRecord>, ProductRecordError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(
        &self,
        id: i64,
        request: UpdateProductRecord,
    ) -> Result<ProductRecord, ProductRecordError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.product_id != current.product_id {
            self.require_product(merged.product_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| ProductRecordError::from_write(e, merged.product_id))?
            .ok_or(ProductRecordError::NotFound(id))?;
        tracing::info!(id, "product record updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ProductRecordError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => ProductRecordError::InUse(id),
            _ => ProductRecordError::Store(e),
        })?;
        if removed == 0 {
            return Err(ProductRecordError::NotFound(id));
        }
        tracing::info!(id, "product record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{MemoryProductRecords, MemoryProducts};

    fn request(product_id: i64) -> CreateProductRecord {
        CreateProductRecord {
            last_update_date: "2022-04-04T10:00:00".parse().unwrap(),
            purchase_price: 10.5,
            sale_price: 15.0,
            product_id,
        }
    }

    fn service(records: MemoryProductRecords) -> ProductRecordService {
        ProductRecordService::new(Arc::new(records), Arc::new(MemoryProducts::with_ids(&[1, 2])))
    }

    #[tokio::test]
    async fn product_must_exist() {
        let service = service(MemoryProductRecords::default());
        assert_eq!(service.create(request(1)).await.unwrap().id, 1);

        let err = service.create(request(6)).await.unwrap_err();
        assert!(matches!(err, ProductRecordError::ProductMissing(6)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn negative_prices_are_rejected() {
        let service = service(MemoryProductRecords::default());
        let mut req = request(1);
        req.sale_price = -1.0;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_merges_and_checks_the_new_product() {
        let service = service(MemoryProductRecords::default());
        service.create(request(1)).await.unwrap();

        let updated = service
            .update(
                1,
                UpdateProductRecord {
                    sale_price: Some(0.0),
                    product_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.sale_price, 0.0);
        assert_eq!(updated.purchase_price, 10.5);
        assert_eq!(updated.product_id, 2);

        assert!(matches!(
            service
                .update(
                    1,
                    UpdateProductRecord {
                        product_id: Some(3),
                        ..Default::default()
                    },
                )
                .await,
            Err(ProductRecordError::ProductMissing(3))
        ));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = service(MemoryProductRecords::default());
        assert!(matches!(service.get(1).await, Err(ProductRecordError::NotFound(1))));
        assert!(matches!(
            service.update(1, UpdateProductRecord::default()).await,
            Err(ProductRecordError::NotFound(1))
        ));
        assert!(matches!(service.delete(1).await, Err(ProductRecordError::NotFound(1))));
    }

    #[tokio::test]
    async fn delete_removes_unreferenced_records_only() {
        let service = service(MemoryProductRecords::default());
        service.create(request(1)).await.unwrap();
        service.delete(1).await.unwrap();
        assert!(service.get_all().await.unwrap().is_empty());

        let records = MemoryProductRecords::with_ids(&[1]);
        records.rows.reject_writes(Violation::ForeignKey);
        let service = ProductRecordService::new(Arc::new(records), Arc::new(MemoryProducts::default()));
        assert!(matches!(service.delete(1).await, Err(ProductRecordError::InUse(1))));
    }
}
