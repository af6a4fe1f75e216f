//! Product rules: unique code, existing seller, record report.

use super::{single_owner, CrudService};
use crate::error::AppError;
use crate::model::{CreateProduct, Product, ProductRecordsReport, UpdateProduct};
use crate::repository::{ProductRepository, SellerRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("product code {0} already exists")]
    CodeTaken(String),
    #[error("seller {0} does not exist")]
    SellerMissing(i64),
    #[error("product {0} still has records or batches")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::CodeTaken(_) | ProductError::SellerMissing(_) | ProductError::InUse(_) => {
                AppError::Conflict(err.to_string())
            }
            ProductError::Validation(e) => AppError::Validation(e.0),
            ProductError::Store(e) => AppError::Db(e),
        }
    }
}

impl ProductError {
    fn from_write(err: sqlx::Error, code: &str, seller_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => ProductError::CodeTaken(code.to_string()),
            Some(Violation::ForeignKey) => ProductError::SellerMissing(seller_id),
            None => ProductError::Store(err),
        }
    }
}

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    sellers: Arc<dyn SellerRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>, sellers: Arc<dyn SellerRepository>) -> Self {
        ProductService { repo, sellers }
    }

    async fn require_seller(&self, seller_id: i64) -> Result<(), ProductError> {
        if !self.sellers.exists(seller_id).await? {
            return Err(ProductError::SellerMissing(seller_id));
        }
        Ok(())
    }

    /// Price records kept per product.
    pub async fn report_records(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<ProductRecordsReport>, ProductError> {
        let rows = self.repo.count_records(id).await?;
        single_owner(rows, id).ok_or(ProductError::NotFound(id.unwrap_or_default()))
    }
}

#[async_trait]
impl CrudService for ProductService {
    type Entity = Product;
    type Create = CreateProduct;
    type Update = UpdateProduct;
    type Error = ProductError;

    async fn create(&self, request: CreateProduct) -> Result<Product, ProductError> {
        request.validate()?;
        if self.repo.exists_code(&request.product_code).await? {
            return Err(ProductError::CodeTaken(request.product_code));
        }
        self.require_seller(request.seller_id).await?;
        let product = self
            .repo
            .create(&request)
            .await
            .map_err(|e| ProductError::from_write(e, &request.product_code, request.seller_id))?;
        tracing::info!(id = product.id, code = %product.product_code, "product created");
        Ok(product)
    }

    async fn get(&self, id: i64) -> Result<Product, ProductError> {
        self.repo.get(id).await?.ok_or(ProductError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateProduct) -> Result<Product, ProductError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.product_code != current.product_code
            && self.repo.exists_code(&merged.product_code).await?
        {
            return Err(ProductError::CodeTaken(merged.product_code));
        }
        if merged.seller_id != current.seller_id {
            self.require_seller(merged.seller_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| ProductError::from_write(e, &merged.product_code, merged.seller_id))?
            .ok_or(ProductError::NotFound(id))?;
        tracing::info!(id, "product updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ProductError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => ProductError::InUse(id),
            _ => ProductError::Store(e),
        })?;
        if removed == 0 {
            return Err(ProductError::NotFound(id));
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
