//! Warehouse employees and the inbound-order report row.

use crate::service::validation::{optional, require_positive, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateEmployee {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub warehouse_id: Option<i64>,
}

/// An employee together with the number of inbound orders they registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployeeInboundOrdersReport {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
    pub inbound_orders_count: i64,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("card_number_id", &self.card_number_id)?;
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_positive("warehouse_id", self.warehouse_id)
    }
}

impl UpdateEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.card_number_id.as_deref(), |v| require_text("card_number_id", v))?;
        optional(self.first_name.as_deref(), |v| require_text("first_name", v))?;
        optional(self.last_name.as_deref(), |v| require_text("last_name", v))?;
        optional(self.warehouse_id.as_ref(), |v| require_positive("warehouse_id", *v))
    }

    pub fn apply(self, employee: &mut Employee) {
        if let Some(v) = self.card_number_id {
            employee.card_number_id = v;
        }
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.warehouse_id {
            employee.warehouse_id = v;
        }
    }
}
