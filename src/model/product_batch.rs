//! Product batches stored in a section. Manufacturing must not come after the due date.

use crate::service::validation::{
    optional, require_non_negative, require_positive, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductBatch {
    pub id: i64,
    pub batch_number: i64,
    pub current_quantity: i32,
    pub current_temperature: f64,
    pub due_date: NaiveDate,
    pub initial_quantity: i32,
    pub manufacturing_date: NaiveDate,
    pub manufacturing_hour: i32,
    pub minimum_temperature: f64,
    pub product_id: i64,
    pub section_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateProductBatch {
    pub batch_number: i64,
    pub current_quantity: i32,
    pub current_temperature: f64,
    pub due_date: NaiveDate,
    pub initial_quantity: i32,
    pub manufacturing_date: NaiveDate,
    pub manufacturing_hour: i32,
    pub minimum_temperature: f64,
    pub product_id: i64,
    pub section_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProductBatch {
    pub batch_number: Option<i64>,
    pub current_quantity: Option<i32>,
    pub current_temperature: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub initial_quantity: Option<i32>,
    pub manufacturing_date: Option<NaiveDate>,
    pub manufacturing_hour: Option<i32>,
    pub minimum_temperature: Option<f64>,
    pub product_id: Option<i64>,
    pub section_id: Option<i64>,
}

fn require_hour(value: i32) -> Result<(), ValidationError> {
    if !(0..=23).contains(&value) {
        return Err(ValidationError("manufacturing_hour must be between 0 and 23".into()));
    }
    Ok(())
}

fn require_date_order(manufactured: NaiveDate, due: NaiveDate) -> Result<(), ValidationError> {
    if manufactured > due {
        return Err(ValidationError(
            "manufacturing_date must not be after due_date".into(),
        ));
    }
    Ok(())
}

impl CreateProductBatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("batch_number", self.batch_number)?;
        require_non_negative("current_quantity", self.current_quantity)?;
        require_non_negative("initial_quantity", self.initial_quantity)?;
        require_hour(self.manufacturing_hour)?;
        require_date_order(self.manufacturing_date, self.due_date)?;
        require_positive("product_id", self.product_id)?;
        require_positive("section_id", self.section_id)
    }
}

impl UpdateProductBatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.batch_number.as_ref(), |v| require_positive("batch_number", *v))?;
        optional(self.current_quantity.as_ref(), |v| {
            require_non_negative("current_quantity", *v)
        })?;
        optional(self.initial_quantity.as_ref(), |v| {
            require_non_negative("initial_quantity", *v)
        })?;
        optional(self.manufacturing_hour.as_ref(), |v| require_hour(*v))?;
        optional(self.product_id.as_ref(), |v| require_positive("product_id", *v))?;
        optional(self.section_id.as_ref(), |v| require_positive("section_id", *v))
    }

    pub fn apply(self, batch: &mut ProductBatch) {
        if let Some(v) = self.batch_number {
            batch.batch_number = v;
        }
        if let Some(v) = self.current_quantity {
            batch.current_quantity = v;
        }
        if let Some(v) = self.current_temperature {
            batch.current_temperature = v;
        }
        if let Some(v) = self.due_date {
            batch.due_date = v;
        }
        if let Some(v) = self.initial_quantity {
            batch.initial_quantity = v;
        }
        if let Some(v) = self.manufacturing_date {
            batch.manufacturing_date = v;
        }
        if let Some(v) = self.manufacturing_hour {
            batch.manufacturing_hour = v;
        }
        if let Some(v) = self.minimum_temperature {
            batch.minimum_temperature = v;
        }
        if let Some(v) = self.product_id {
            batch.product_id = v;
        }
        if let Some(v) = self.section_id {
            batch.section_id = v;
        }
    }
}

impl ProductBatch {
    /// Date ordering spans two fields, so it is checked on the merged record.
    pub fn validate_dates(&self) -> Result<(), ValidationError> {
        require_date_order(self.manufacturing_date, self.due_date)
    }
}
