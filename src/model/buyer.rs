//! Buyers, identified by their card number.

use crate::service::validation::{optional, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Buyer {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateBuyer {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateBuyer {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BuyerPurchaseOrdersReport {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}

impl CreateBuyer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("card_number_id", &self.card_number_id)?;
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)
    }
}

impl UpdateBuyer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        optional(self.card_number_id.as_deref(), |v| require_text("card_number_id", v))?;
        optional(self.first_name.as_deref(), |v| require_text("first_name", v))?;
        optional(self.last_name.as_deref(), |v| require_text("last_name", v))
    }

    pub fn apply(self, buyer: &mut Buyer) {
        if let Some(v) = self.card_number_id {
            buyer.card_number_id = v;
        }
        if let Some(v) = self.first_name {
            buyer.first_name = v;
        }
        if let Some(v) = self.last_name {
            buyer.last_name = v;
        }
    }
}
