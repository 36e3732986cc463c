//! Menu API 模块
//!
//! 顾客端只读可售菜单，管理端全量增删改查。

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/menu", customer_routes())
        .nest("/api/admin/menu", admin_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list_available))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/toggle", patch(handler::toggle))
}
