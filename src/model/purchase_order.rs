//! Purchase orders placed by buyers.

use crate::service::validation::{optional, require_positive, require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PurchaseOrder {
    pub id: i64,
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: i64,
    pub product_record_id: i64,
    pub order_status_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreatePurchaseOrder {
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: i64,
    pub product_record_id: i64,
    pub order_status_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatePurchaseOrder {
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub tracking_code: Option<String>,
    pub buyer_id: Option<i64>,
    pub product_record_id: Option<i64>,
    pub order_status_id: Option<i64>,
}

impl CreatePurchaseOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("order_number", &self.order_number)?;
        require_text("tracking_code", &self.tracking_code)?;
        require_positive("buyer_id", self.buyer_id)?;
        require_positive("product_record_id", self.product_record_id)?;
        require_positive("order_status_id", self.order_status_id)
    }
}

impl UpdatePurchaseOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.order_number.as_deref(), |v| require_text("order_number", v))?;
        optional(self.tracking_code.as_deref(), |v| require_text("tracking_code", v))?;
        optional(self.buyer_id.as_ref(), |v| require_positive("buyer_id", *v))?;
        optional(self.product_record_id.as_ref(), |v| {
            require_positive("product_record_id", *v)
        })?;
        optional(self.order_status_id.as_ref(), |v| require_positive("order_status_id", *v))
    }

    pub fn apply(self, order: &mut PurchaseOrder) {
        if let Some(v) = self.order_number {
            order.order_number = v;
        }
        if let Some(v) = self.order_date {
            order.order_date = v;
        }
        if let Some(v) = self.tracking_code {
            order.tracking_code = v;
        }
        if let Some(v) = self.buyer_id {
            order.buyer_id = v;
        }
        if let Some(v) = self.product_record_id {
            order.product_record_id = v;
        }
        if let Some(v) = self.order_status_id {
            order.order_status_id = v;
        }
    }
}
