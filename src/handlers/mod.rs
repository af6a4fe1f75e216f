//! HTTP handlers: generic CRUD over any [`CrudService`](crate::service::CrudService) and the
//! aggregation reports.

pub mod crud;
pub mod report;
