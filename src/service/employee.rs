//! Employee rules: unique card number, existing warehouse, inbound-order report.

use super::{single_owner, CrudService};
use crate::error::AppError;
use crate::model::{CreateEmployee, Employee, EmployeeInboundOrdersReport, UpdateEmployee};
use crate::repository::{EmployeeRepository, WarehouseRepository};
use crate::service::validation::ValidationError;
use crate::store::{self, Violation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("employee {0} not found")]
    NotFound(i64),
    #[error("card number {0} already exists")]
    CardNumberTaken(String),
    #[error("warehouse {0} does not exist")]
    WarehouseMissing(i64),
    #[error("employee {0} still has inbound orders")]
    InUse(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<EmployeeError> for AppError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::NotFound(_) => AppError::NotFound(err.to_string()),
            EmployeeError::CardNumberTaken(_)
            | EmployeeError::WarehouseMissing(_)
            | EmployeeError::InUse(_) => AppError::Conflict(err.to_string()),
            EmployeeError::Validation(e) => AppError::Validation(e.0),
            EmployeeError::Store(e) => AppError::Db(e),
        }
    }
}

impl EmployeeError {
    fn from_write(err: sqlx::Error, card_number_id: &str, warehouse_id: i64) -> Self {
        match store::violation(&err) {
            Some(Violation::Unique) => EmployeeError::CardNumberTaken(card_number_id.to_string()),
            Some(Violation::ForeignKey) => EmployeeError::WarehouseMissing(warehouse_id),
            None => EmployeeError::Store(err),
        }
    }
}

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>, warehouses: Arc<dyn WarehouseRepository>) -> Self {
        EmployeeService { repo, warehouses }
    }

    async fn require_warehouse(&self, warehouse_id: i64) -> Result<(), EmployeeError> {
        if !self.warehouses.exists(warehouse_id).await? {
            return Err(EmployeeError::WarehouseMissing(warehouse_id));
        }
        Ok(())
    }

    /// Inbound orders registered per employee.
    pub async fn report_inbound_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<EmployeeInboundOrdersReport>, EmployeeError> {
        let rows = self.repo.count_inbound_orders(id).await?;
        single_owner(rows, id).ok_or(EmployeeError::NotFound(id.unwrap_or_default()))
    }
}

#[async_trait]
impl CrudService for EmployeeService {
    type Entity = Employee;
    type Create = CreateEmployee;
    type Update = UpdateEmployee;
    type Error = EmployeeError;

    async fn create(&self, request: CreateEmployee) -> Result<Employee, EmployeeError> {
        request.validate()?;
        if self.repo.exists_card_number(&request.card_number_id).await? {
            return Err(EmployeeError::CardNumberTaken(request.card_number_id));
        }
        self.require_warehouse(request.warehouse_id).await?;
        let employee = self.repo.create(&request).await.map_err(|e| {
            EmployeeError::from_write(e, &request.card_number_id, request.warehouse_id)
        })?;
        tracing::info!(id = employee.id, "employee created");
        Ok(employee)
    }

    async fn get(&self, id: i64) -> Result<Employee, EmployeeError> {
        self.repo.get(id).await?.ok_or(EmployeeError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.repo.get_all().await?)
    }

    async fn update(&self, id: i64, request: UpdateEmployee) -> Result<Employee, EmployeeError> {
        request.validate()?;
        let current = self.get(id).await?;
        let mut merged = current.clone();
        request.apply(&mut merged);
        if merged.card_number_id != current.card_number_id
            && self.repo.exists_card_number(&merged.card_number_id).await?
        {
            return Err(EmployeeError::CardNumberTaken(merged.card_number_id));
        }
        if merged.warehouse_id != current.warehouse_id {
            self.require_warehouse(merged.warehouse_id).await?;
        }
        let updated = self
            .repo
            .update(&merged)
            .await
            .map_err(|e| EmployeeError::from_write(e, &merged.card_number_id, merged.warehouse_id))?
            .ok_or(EmployeeError::NotFound(id))?;
        tracing::info!(id, "employee updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), EmployeeError> {
        let removed = self.repo.delete(id).await.map_err(|e| match store::violation(&e) {
            Some(Violation::ForeignKey) => EmployeeError::InUse(id),
            _ => EmployeeError::Store(e),
        })?;
        if removed == 0 {
            return Err(EmployeeError::NotFound(id));
        }
        tracing::info!(id, "employee deleted");
        Ok(())
    }
}
