//! Warehouses, keyed by `warehouse_code`.

use crate::service::validation::{
    optional, require_non_negative, require_positive, require_text, ValidationError,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i32,
    pub minimum_temperature: f64,
    pub locality_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateWarehouse {
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i32,
    pub minimum_temperature: f64,
    pub locality_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateWarehouse {
    pub warehouse_code: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub minimum_capacity: Option<i32>,
    pub minimum_temperature: Option<f64>,
    pub locality_id: Option<i64>,
}

impl CreateWarehouse {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("warehouse_code", &self.warehouse_code)?;
        require_text("address", &self.address)?;
        require_text("telephone", &self.telephone)?;
        require_non_negative("minimum_capacity", self.minimum_capacity)?;
        require_positive("locality_id", self.locality_id)
    }
}

impl UpdateWarehouse {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.warehouse_code.as_deref(), |v| require_text("warehouse_code", v))?;
        optional(self.address.as_deref(), |v| require_text("address", v))?;
        optional(self.telephone.as_deref(), |v| require_text("telephone", v))?;
        optional(self.minimum_capacity.as_ref(), |v| {
            require_non_negative("minimum_capacity", *v)
        })?;
        optional(self.locality_id.as_ref(), |v| require_positive("locality_id", *v))
    }

    pub fn apply(self, warehouse: &mut Warehouse) {
        if let Some(v) = self.warehouse_code {
            warehouse.warehouse_code = v;
        }
        if let Some(v) = self.address {
            warehouse.address = v;
        }
        if let Some(v) = self.telephone {
            warehouse.telephone = v;
        }
        if let Some(v) = self.minimum_capacity {
            warehouse.minimum_capacity = v;
        }
        if let Some(v) = self.minimum_temperature {
            warehouse.minimum_temperature = v;
        }
        if let Some(v) = self.locality_id {
            warehouse.locality_id = v;
        }
    }
}
