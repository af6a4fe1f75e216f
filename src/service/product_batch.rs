//! Product batch rules: unique batch number, existing product and section.

use super::CrudService;
use crate::error::AppError;
use crate::model::{CreateProductBatch, ProductBatch, UpdateProductBatch};
use crate::repository::{ProductBatchRepository, ProductRepository, SectionRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductBatchError {
    #[error("product batch {0} not found")]
    NotFound(i64),
    #[error("batch number {0} already exists")]
    NumberTaken(i64),
    #[error("product {0} does not exist")]
    ProductMissing(i64),
    #[error("section {0} does not exist")]
    SectionMissing(i64),
    #[error("product or section referenced by the batch does not exist")]
    ReferenceMissing,
    #[error("product batch {0} is still referenced by inbound orders")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<ProductBatchError> for AppError {
    fn from(err: ProductBatchError) -> Self {
        match err {
            ProductBatchError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductBatchError::NumberTaken(_)
            | ProductBatchError::ProductMissing(_)
            | ProductBatchError::SectionMissing(_)
            | ProductBatchError::ReferenceMissing
            | ProductBatchError::InUse(_) => AppError::Conflict(err.to_string()),
            ProductBatchError::Validation(e) => AppError::Validation(e.0),
            ProductBatchError::Store(e) => AppError::Db(e),
        }
    }
}

impl ProductBatchError {
    fn from_write(err: sqlx::Error, batch_number: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => ProductBatchError::NumberTaken(batch_number),
            Some(Violation::ForeignKey) => ProductBatchError::ReferenceMissing,
            None => ProductBatchError::Store(err),
        }
    }
}

pub struct ProductBatchService {
    repo: Arc<dyn ProductBatchRepository>,
    products: Arc<dyn ProductRepository>,
    sections: Arc<dyn SectionRepository>,
}

impl ProductBatchService {
    pub fn new(
        repo: Arc<dyn ProductBatchRepository>,
        products: Arc<dyn ProductRepository>,
        sections: Arc<dyn SectionRepository>,
    ) -> Self {
        ProductBatchService {
            repo,
            products,
            sections,
        }
    }

    async fn require_references(
        &self,
        product_id: Option<i64>,
        section_id: Option<i64>,
    ) -> Result<(), ProductBatchError> {
        if let Some(product_id) = product_id {
            if !self.products.exists(product_id).await? {
                return Err(ProductBatchError::ProductMissing(product_id));
            }
        }
        if let Some(section_id) = section_id {
            if !self.sections.exists(section_id).await? {
                return Err(ProductBatchError::SectionMissing(section_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CrudService for ProductBatchService {
    type Entity = ProductBatch;
    type Create = CreateProductBatch;
    type Update = UpdateProductBatch;
    type Error = ProductBatchError;

    async fn create(&self, request: CreateProductBatch) -> Result<ProductBatch, ProductBatchError> {
        request.validate()?;
        if self.repo.exists_number(request.batch_number).await? {
            return Err(ProductBatchError::NumberTaken(request.batch_number));
        }
        self.require_references(Some(request.product_id), Some(request.section_id))
            .await?;
        let batch = self
            .repo
            .create(&request)
            .await
            .map_err(|e| ProductBatchError::from_write(e, request.batch_number))?;
        tracing::info!(id = batch.id, batch_number = batch.batch_number, "product batch created");
        Ok(batch)
    }

    async fn get(&self, id: i64) -> Result<ProductBatch, ProductBatchError> {
        self.repo.get(id).await?.ok_or(ProductBatchError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<ProductBatch>, ProductBatchError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(
        &self,
        id: i64,
        request: UpdateProductBatch,
    ) -> Result<ProductBatch, ProductBatchError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        merged.validate_dates()?;
        if merged.batch_number != current.batch_number
            && self.repo.exists_number(merged.batch_number).await?
        {
            return Err(ProductBatchError::NumberTaken(merged.batch_number));
        }
        self.require_references(
            Some(merged.product_id).filter(|id| *id != current.product_id),
            Some(merged.section_id).filter(|id| *id != current.section_id),
        )
        .await?;
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| ProductBatchError::from_write(e, merged.batch_number))?
            .ok_or(ProductBatchError::NotFound(id))?;
        tracing::info!(id, "product batch updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ProductBatchError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => ProductBatchError::InUse(id),
            _ => ProductBatchError::Store(e),
        })?;
        if removed == 0 {
            return Err(ProductBatchError::NotFound(id));
        }
        tracing::info!(id, "product batch deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{MemoryProductBatches, MemoryProducts, MemorySections};

    fn request(batch_number: i64) -> CreateProductBatch {
        CreateProductBatch {
            batch_number,
            current_quantity: 200,
            current_temperature: 20.0,
            due_date: "2022-05-04".parse().unwrap(),
            initial_quantity: 10,
            manufacturing_date: "2022-04-04".parse().unwrap(),
            manufacturing_hour: 10,
            minimum_temperature: -5.0,
            product_id: 1,
            section_id: 1,
        }
    }

    fn service(batches: MemoryProductBatches) -> ProductBatchService {
        ProductBatchService::new(
            Arc::new(batches),
            Arc::new(MemoryProducts::with_ids(&[1])),
            Arc::new(MemorySections::with_ids(&[1, 2])),
        )
    }

    #[tokio::test]
    async fn batch_number_is_unique_and_references_must_exist() {
        let service = service(MemoryProductBatches::default());
        service.create(request(111)).await.unwrap();
        assert!(matches!(
            service.create(request(111)).await,
            Err(ProductBatchError::NumberTaken(111))
        ));

        let mut req = request(112);
        req.product_id = 5;
        assert!(matches!(
            service.create(req).await,
            Err(ProductBatchError::ProductMissing(5))
        ));

        let mut req = request(112);
        req.section_id = 6;
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, ProductBatchError::SectionMissing(6)));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn merged_dates_must_stay_in_order() {
        let service = service(MemoryProductBatches::default());
        service.create(request(111)).await.unwrap();

        let err = service
            .update(
                1,
                UpdateProductBatch {
                    manufacturing_date: Some("2022-06-01".parse().unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductBatchError::Validation(_)));

        let moved = service
            .update(
                1,
                UpdateProductBatch {
                    due_date: Some("2022-07-01".parse().unwrap()),
                    section_id: Some(2),
                    current_quantity: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.section_id, 2);
        assert_eq!(moved.current_quantity, 0);
        assert_eq!(moved.initial_quantity, 10);
        assert_eq!(moved.manufacturing_date, request(1).manufacturing_date);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = service(MemoryProductBatches::default());
        assert!(matches!(service.get(3).await, Err(ProductBatchError::NotFound(3))));
        assert!(matches!(
            service.update(3, UpdateProductBatch::default()).await,
            Err(ProductBatchError::NotFound(3))
        ));
        assert!(matches!(service.delete(3).await, Err(ProductBatchError::NotFound(3))));
    }

    #[tokio::test]
    async fn store_constraints_map_to_conflicts() {
        let batches = MemoryProductBatches::with_ids(&[1]);
        batches.rows.reject_writes(Violation::ForeignKey);
        let service = service(batches);
        assert!(matches!(service.delete(1).await, Err(ProductBatchError::InUse(1))));
        assert!(matches!(
            service.create(request(500)).await,
            Err(ProductBatchError::ReferenceMissing)
        ));
    }
}
