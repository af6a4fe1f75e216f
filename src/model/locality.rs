//! Localities and the per-locality seller and carrier report rows.

use crate::service::validation::{optional, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Locality {
    pub id: i64,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateLocality {
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateLocality {
    pub locality_name: Option<String>,
    pub province_name: Option<String>,
    pub country_name: Option<String>,
}

/// Sellers registered per locality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LocalitySellersReport {
    pub locality_id: i64,
    pub locality_name: String,
    pub sellers_count: i64,
}

/// Carriers registered per locality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LocalityCarriersReport {
    pub locality_id: i64,
    pub locality_name: String,
    pub carriers_count: i64,
}

impl CreateLocality {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("locality_name", &self.locality_name)?;
        require_text("province_name", &self.province_name)?;
        require_text("country_name", &self.country_name)
    }
}

impl UpdateLocality {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.locality_name.as_deref(), |v| require_text("locality_name", v))?;
        optional(self.province_name.as_deref(), |v| require_text("province_name", v))?;
        optional(self.country_name.as_deref(), |v| require_text("country_name", v))
    }

    pub fn apply(self, locality: &mut Locality) {
        if let Some(v) = self.locality_name {
            locality.locality_name = v;
        }
        if let Some(v) = self.province_name {
            locality.province_name = v;
        }
        if let Some(v) = self.country_name {
            locality.country_name = v;
        }
    }
}

impl Locality {
    /// The natural key: a locality name is unique within its province and country.
    pub fn same_place(&self, other: &Locality) -> bool {
        self.locality_name == other.locality_name
            && self.province_name == other.province_name
            && self.country_name == other.country_name
    }
}
