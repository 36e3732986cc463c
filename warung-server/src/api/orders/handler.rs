//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::OrderDetail;
use crate::orders::{OrderStatus, PlaceOrder};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// 下单成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order_id: i64,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub success: bool,
}

/// POST /api/orders - 顾客下单，请求体携带桌台令牌
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrder>,
) -> AppResult<Json<PlaceOrderResponse>> {
    let order_id = state.orders.place(payload).await?;
    Ok(Json(PlaceOrderResponse {
        success: true,
        order_id,
        message: "Order placed successfully",
    }))
}

/// GET /api/orders?status= - 员工端订单列表，最新在前
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = state.orders.list(query.status).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - 订单状态单步推进
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<StatusUpdated>> {
    state.orders.transition(id, body.status).await?;
    Ok(Json(StatusUpdated { success: true }))
}
