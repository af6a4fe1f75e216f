//! Inbound orders: a product batch received at a warehouse by an employee.

use crate::service::validation::{optional, require_positive, require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InboundOrder {
    pub id: i64,
    pub order_date: NaiveDate,
    pub order_number: String,
    pub employee_id: i64,
    pub product_batch_id: i64,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateInboundOrder {
    pub order_date: NaiveDate,
    pub order_number: String,
    pub employee_id: i64,
    pub product_batch_id: i64,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateInboundOrder {
    pub order_date: Option<NaiveDate>,
    pub order_number: Option<String>,
    pub employee_id: Option<i64>,
    pub product_batch_id: Option<i64>,
    pub warehouse_id: Option<i64>,
}

impl CreateInboundOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("order_number", &self.order_number)?;
        require_positive("employee_id", self.employee_id)?;
        require_positive("product_batch_id", self.product_batch_id)?;
        require_positive("warehouse_id", self.warehouse_id)
    }
}

impl UpdateInboundOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.order_number.as_deref(), |v| require_text("order_number", v))?;
        optional(self.employee_id.as_ref(), |v| require_positive("employee_id", *v))?;
        optional(self.product_batch_id.as_ref(), |v| {
            require_positive("product_batch_id", *v)
        })?;
        optional(self.warehouse_id.as_ref(), |v| require_positive("warehouse_id", *v))
    }

    pub fn apply(self, order: &mut InboundOrder) {
        if let Some(v) = self.order_date {
            order.order_date = v;
        }
        if let Some(v) = self.order_number {
            order.order_number = v;
        }
        if let Some(v) = self.employee_id {
            order.employee_id = v;
        }
        if let Some(v) = self.product_batch_id {
            order.product_batch_id = v;
        }
        if let Some(v) = self.warehouse_id {
            order.warehouse_id = v;
        }
    }
}
