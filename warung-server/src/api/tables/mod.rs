//! Table QR API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/table", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/decode/{token}", get(handler::decode))
        .route("/{table_number}", get(handler::get_qr))
        .route("/{table_number}/regenerate", post(handler::regenerate))
}
