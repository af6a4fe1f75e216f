//! Shared application state. The pool is the only resource shared between requests; the
//! services hold their repositories, which hold clones of the same pool.

use crate::repository::Repositories;
use crate::service::Services;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub services: Services,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let services = Services::new(&Repositories::postgres(&pool));
        AppState { pool, services }
    }
}
