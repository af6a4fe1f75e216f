//! Entity groups. Every group gets the same five CRUD routes; owners of an aggregation get
//! their report route next to them.

use crate::handlers::{crud, report};
use crate::service::{CrudService, Services};
use axum::{routing::get, Router};
use std::sync::Arc;

/// `GET /` list, `POST /` create, `GET|PATCH|DELETE /:id`.
pub fn crud_routes<S: CrudService>(service: Arc<S>) -> Router {
    Router::new()
        .route("/", get(crud::list::<S>).post(crud::create::<S>))
        .route(
            "/:id",
            get(crud::read::<S>)
                .patch(crud::update::<S>)
                .delete(crud::delete::<S>),
        )
        .with_state(service)
}

pub fn api_routes(services: &Services) -> Router {
    let localities = crud_routes(services.localities.clone()).merge(
        Router::new()
            .route("/reportSellers", get(report::locality_sellers))
            .route("/reportCarriers", get(report::locality_carriers))
            .with_state(services.localities.clone()),
    );
    let sections = crud_routes(services.sections.clone()).merge(
        Router::new()
            .route("/reportProducts", get(report::section_products))
            .with_state(services.sections.clone()),
    );
    let products = crud_routes(services.products.clone()).merge(
        Router::new()
            .route("/reportRecords", get(report::product_records))
            .with_state(services.products.clone()),
    );
    let employees = crud_routes(services.employees.clone()).merge(
        Router::new()
            .route("/reportInboundOrders", get(report::employee_inbound_orders))
            .with_state(services.employees.clone()),
    );
    let buyers = crud_routes(services.buyers.clone()).merge(
        Router::new()
            .route("/reportPurchaseOrders", get(report::buyer_purchase_orders))
            .with_state(services.buyers.clone()),
    );

    Router::new()
        .nest("/localities", localities)
        .nest("/sellers", crud_routes(services.sellers.clone()))
        .nest("/warehouses", crud_routes(services.warehouses.clone()))
        .nest("/sections", sections)
        .nest("/products", products)
        .nest("/productRecords", crud_routes(services.product_records.clone()))
        .nest("/productBatches", crud_routes(services.product_batches.clone()))
        .nest("/employees", employees)
        .nest("/inboundOrders", crud_routes(services.inbound_orders.clone()))
        .nest("/buyers", buyers)
        .nest("/carriers", crud_routes(services.carriers.clone()))
        .nest("/purchaseOrders", crud_routes(services.purchase_orders.clone()))
}
