//! Warehouse sections and their capacity bounds.

use crate::service::validation::{
    optional, require_non_negative, require_positive, ValidationError,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: i64,
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i32,
    pub minimum_capacity: i32,
    pub maximum_capacity: i32,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateSection {
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i32,
    pub minimum_capacity: i32,
    pub maximum_capacity: i32,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateSection {
    pub section_number: Option<i64>,
    pub current_temperature: Option<f64>,
    pub minimum_temperature: Option<f64>,
    pub current_capacity: Option<i32>,
    pub minimum_capacity: Option<i32>,
    pub maximum_capacity: Option<i32>,
    pub warehouse_id: Option<i64>,
    pub product_type_id: Option<i64>,
}

/// Product batches stored per section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SectionProductsReport {
    pub section_id: i64,
    pub section_number: i64,
    pub products_count: i64,
}

impl CreateSection {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("section_number", self.section_number)?;
        require_non_negative("current_capacity", self.current_capacity)?;
        require_non_negative("minimum_capacity", self.minimum_capacity)?;
        require_non_negative("maximum_capacity", self.maximum_capacity)?;
        require_positive("warehouse_id", self.warehouse_id)?;
        require_positive("product_type_id", self.product_type_id)?;
        check_capacities(self.current_capacity, self.minimum_capacity, self.maximum_capacity)
    }
}

impl UpdateSection {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.section_number.as_ref(), |v| require_positive("section_number", *v))?;
        optional(self.current_capacity.as_ref(), |v| {
            require_non_negative("current_capacity", *v)
        })?;
        optional(self.minimum_capacity.as_ref(), |v| {
            require_non_negative("minimum_capacity", *v)
        })?;
        optional(self.maximum_capacity.as_ref(), |v| {
            require_non_negative("maximum_capacity", *v)
        })?;
        optional(self.warehouse_id.as_ref(), |v| require_positive("warehouse_id", *v))?;
        optional(self.product_type_id.as_ref(), |v| require_positive("product_type_id", *v))
    }

    pub fn apply(self, section: &mut Section) {
        if let Some(v) = self.section_number {
            section.section_number = v;
        }
        if let Some(v) = self.current_temperature {
            section.current_temperature = v;
        }
        if let Some(v) = self.minimum_temperature {
            section.minimum_temperature = v;
        }
        if let Some(v) = self.current_capacity {
            section.current_capacity = v;
        }
        if let Some(v) = self.minimum_capacity {
            section.minimum_capacity = v;
        }
        if let Some(v) = self.maximum_capacity {
            section.maximum_capacity = v;
        }
        if let Some(v) = self.warehouse_id {
            section.warehouse_id = v;
        }
        if let Some(v) = self.product_type_id {
            section.product_type_id = v;
        }
    }
}

impl Section {
    /// Capacity bounds must still hold once an update has been merged.
    pub fn validate_capacities(&self) -> Result<(), ValidationError> {
        check_capacities(self.current_capacity, self.minimum_capacity, self.maximum_capacity)
    }
}

fn check_capacities(current: i32, minimum: i32, maximum: i32) -> Result<(), ValidationError> {
    if minimum > maximum {
        return Err(ValidationError(
            "minimum_capacity must not exceed maximum_capacity".into(),
        ));
    }
    if current > maximum {
        return Err(ValidationError(
            "current_capacity must not exceed maximum_capacity".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        Section {
            id: 1,
            section_number: 10,
            current_temperature: 2.0,
            minimum_temperature: -5.0,
            current_capacity: 20,
            minimum_capacity: 10,
            maximum_capacity: 50,
            warehouse_id: 1,
            product_type_id: 1,
        }
    }

    #[test]
    fn merged_capacities_are_rechecked() {
        let mut s = section();
        UpdateSection {
            maximum_capacity: Some(15),
            ..Default::default()
        }
        .apply(&mut s);
        assert!(s.validate_capacities().is_err());
    }

    #[test]
    fn repeating_the_current_record_is_a_no_op() {
        let mut s = section();
        let before = s.clone();
        UpdateSection {
            section_number: Some(before.section_number),
            current_capacity: Some(before.current_capacity),
            ..Default::default()
        }
        .apply(&mut s);
        assert_eq!(s, before);
    }
}
