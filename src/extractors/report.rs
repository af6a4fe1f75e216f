//! Optional `?id=` filter used by the aggregation report endpoints.

use crate::error::AppError;
use crate::extractors::id::parse_id;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// `None` selects the report over every owner; `Some(id)` selects exactly one owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportFilter(pub Option<i64>);

#[async_trait]
impl<S> FromRequestParts<S> for ReportFilter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let id = params.get("id").map(|raw| parse_id(raw)).transpose()?;
        Ok(ReportFilter(id))
    }
}
