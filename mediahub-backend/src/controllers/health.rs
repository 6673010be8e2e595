//! Liveness and version endpoints; neither touches the database

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// "postgres" or "sqlite", from the scheme of DATABASE_URL
    database: &'static str,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: VERSION,
        database: state.handler.backend(),
    })
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "version": VERSION }))
}
