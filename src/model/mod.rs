//! Plain records mapped from rows, plus the create/update payloads of every entity.
//!
//! Update payloads carry `Option` per attribute: an absent (or `null`) attribute leaves the
//! stored value unchanged, a present one overwrites it, zero included.

pub mod buyer;
pub mod carrier;
pub mod employee;
pub mod inbound_order;
pub mod locality;
pub mod product;
pub mod product_batch;
pub mod product_record;
pub mod purchase_order;
pub mod section;
pub mod seller;
pub mod warehouse;

pub use buyer::*;
pub use carrier::*;
pub use employee::*;
pub use inbound_order::*;
pub use locality::*;
pub use product::*;
pub use product_batch::*;
pub use product_record::*;
pub use purchase_order::*;
pub use section::*;
pub use seller::*;
pub use warehouse::*;
