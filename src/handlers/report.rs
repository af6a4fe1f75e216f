//! Aggregation reports. Without `?id=` the data is one row per owner; with it, the single
//! matching row.

use crate::error::AppError;
use crate::extractors::ReportFilter;
use crate::response::success_ok;
use crate::service::{BuyerService, EmployeeService, LocalityService, ProductService, SectionService};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

fn render<T: Serialize>(mut rows: Vec<T>, filter: Option<i64>) -> Response {
    match (filter, rows.len()) {
        (Some(_), 1) => success_ok(rows.swap_remove(0)).into_response(),
        _ => success_ok(rows).into_response(),
    }
}

pub async fn locality_sellers(
    State(service): State<Arc<LocalityService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_sellers(id).await?;
    Ok(render(rows, id))
}

pub async fn locality_carriers(
    State(service): State<Arc<LocalityService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_carriers(id).await?;
    Ok(render(rows, id))
}

pub async fn section_products(
    State(service): State<Arc<SectionService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_products(id).await?;
    Ok(render(rows, id))
}

pub async fn product_records(
    State(service): State<Arc<ProductService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_records(id).await?;
    Ok(render(rows, id))
}

pub async fn employee_inbound_orders(
    State(service): State<Arc<EmployeeService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_inbound_orders(id).await?;
    Ok(render(rows, id))
}

pub async fn buyer_purchase_orders(
    State(service): State<Arc<BuyerService>>,
    ReportFilter(id): ReportFilter,
) -> Result<Response, AppError> {
    let rows = service.report_purchase_orders(id).await?;
    Ok(render(rows, id))
}
