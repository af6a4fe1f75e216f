//! Products and the per-product price record report row.

use crate::service::validation::{optional, require_positive, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub freezing_rate: f64,
    pub product_type_id: i64,
    pub seller_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateProduct {
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub freezing_rate: f64,
    pub product_type_id: i64,
    pub seller_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub product_code: Option<String>,
    pub description: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub net_weight: Option<f64>,
    pub expiration_rate: Option<f64>,
    pub recommended_freezing_temperature: Option<f64>,
    pub freezing_rate: Option<f64>,
    pub product_type_id: Option<i64>,
    pub seller_id: Option<i64>,
}

/// Product records (price history entries) per product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRecordsReport {
    pub product_id: i64,
    pub description: String,
    pub records_count: i64,
}

impl CreateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("product_code", &self.product_code)?;
        require_text("description", &self.description)?;
        require_positive("product_type_id", self.product_type_id)?;
        require_positive("seller_id", self.seller_id)
    }
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.product_code.as_deref(), |v| require_text("product_code", v))?;
        optional(self.description.as_deref(), |v| require_text("description", v))?;
        optional(self.product_type_id.as_ref(), |v| require_positive("product_type_id", *v))?;
        optional(self.seller_id.as_ref(), |v| require_positive("seller_id", *v))
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.product_code {
            product.product_code = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.width {
            product.width = v;
        }
        if let Some(v) = self.height {
            product.height = v;
        }
        if let Some(v) = self.length {
            product.length = v;
        }
        if let Some(v) = self.net_weight {
            product.net_weight = v;
        }
        if let Some(v) = self.expiration_rate {
            product.expiration_rate = v;
        }
        if let Some(v) = self.recommended_freezing_temperature {
            product.recommended_freezing_temperature = v;
        }
        if let Some(v) = self.freezing_rate {
            product.freezing_rate = v;
        }
        if let Some(v) = self.product_type_id {
            product.product_type_id = v;
        }
        if let Some(v) = self.seller_id {
            product.seller_id = v;
        }
    }
}
