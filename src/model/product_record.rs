//! Price records of a product.

use crate::service::validation::{optional, require_positive, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRecord {
    pub id: i64,
    pub last_update_date: NaiveDateTime,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateProductRecord {
    pub last_update_date: NaiveDateTime,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProductRecord {
    pub last_update_date: Option<NaiveDateTime>,
    pub purchase_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub product_id: Option<i64>,
}

fn require_price(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError(format!("{} must be a non-negative amount", field)));
    }
    Ok(())
}

impl CreateProductRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_price("purchase_price", self.purchase_price)?;
        require_price("sale_price", self.sale_price)?;
        require_positive("product_id", self.product_id)
    }
}

impl UpdateProductRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.purchase_price.as_ref(), |v| require_price("purchase_price", *v))?;
        optional(self.sale_price.as_ref(), |v| require_price("sale_price", *v))?;
        optional(self.product_id.as_ref(), |v| require_positive("product_id", *v))
    }

    pub fn apply(self, record: &mut ProductRecord) {
        if let Some(v) = self.last_update_date {
            record.last_update_date = v;
        }
        if let Some(v) = self.purchase_price {
            record.purchase_price = v;
        }
        if let Some(v) = self.sale_price {
            record.sale_price = v;
        }
        if let Some(v) = self.product_id {
            record.product_id = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_timestamps() {
        let req: CreateProductRecord = serde_json::from_str(
            r#"{"last_update_date":"2022-08-01T10:30:00","purchase_price":10.5,"sale_price":15.0,"product_id":3}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.last_update_date.to_string(), "2022-08-01 10:30:00");
    }

    #[test]
    fn negative_prices_are_rejected() {
        let update = UpdateProductRecord {
            sale_price: Some(-1.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
