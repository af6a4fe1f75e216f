//! Carriers delivering from a locality; `cid` is their business key.

use crate::service::validation::{optional, require_positive, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Carrier {
    pub id: i64,
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateCarrier {
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCarrier {
    pub cid: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub locality_id: Option<i64>,
}

impl CreateCarrier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("cid", &self.cid)?;
        require_text("company_name", &self.company_name)?;
        require_text("address", &self.address)?;
        require_text("telephone", &self.telephone)?;
        require_positive("locality_id", self.locality_id)
    }
}

impl UpdateCarrier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.cid.as_deref(), |v| require_text("cid", v))?;
        optional(self.company_name.as_deref(), |v| require_text("company_name", v))?;
        optional(self.address.as_deref(), |v| require_text("address", v))?;
        optional(self.telephone.as_deref(), |v| require_text("telephone", v))?;
        optional(self.locality_id.as_ref(), |v| require_positive("locality_id", *v))
    }

    pub fn apply(self, carrier: &mut Carrier) {
        if let Some(v) = self.cid {
            carrier.cid = v;
        }
        if let Some(v) = self.company_name {
            carrier.company_name = v;
        }
        if let Some(v) = self.address {
            carrier.address = v;
        }
        if let Some(v) = self.telephone {
            carrier.telephone = v;
        }
        if let Some(v) = self.locality_id {
            carrier.locality_id = v;
        }
    }
}
