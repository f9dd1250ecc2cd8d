use std::sync::Arc;
use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::gateway::ProductGateway;
use crate::inventory::InventoryService;
use crate::metrics::{metrics_handler, Metrics};
use crate::models::DetailsRequest;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/products/{sku}", web::get().to(get_product_details))
        .route("/inventory/{sku}", web::get().to(get_inventory_details))
        .route("/metrics", web::get().to(metrics_handler));
}

async fn get_product_details(
    gateway: web::Data<ProductGateway>,
    metrics: web::Data<Arc<Metrics>>,
    sku: web::Path<String>,
) -> HttpResponse {
    let started = Instant::now();
    let sku = sku.into_inner();

    let response = match gateway.get_product_details(&sku).await {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => error_response(e.status_code(), &e.to_string()),
    };

    metrics.record_product_detail(response.status().as_u16(), started.elapsed().as_secs_f64());
    response
}

async fn get_inventory_details(
    inventory: web::Data<InventoryService>,
    sku: web::Path<String>,
) -> HttpResponse {
    let request = DetailsRequest::new(sku.into_inner());

    match inventory.lookup_details(Some(&request)).await {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => error_response(e.code(), &e.to_string()),
    }
}

/// Writes `detail` as plain text under `code`. Codes that are not a client or
/// server error fall back to 500.
fn error_response(code: u16, detail: &str) -> HttpResponse {
    let status = StatusCode::from_u16(code)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(detail.to_string())
}
