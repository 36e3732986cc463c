//! API 路由模块
//!
//! # 结构
//!
//! - [`tables`] - 桌台二维码接口
//! - [`orders`] - 下单与状态流转接口
//! - [`menu`] - 菜单浏览与管理接口
//! - [`ws`] - 员工实时通道 (WebSocket)
//! - [`health`] - 健康检查

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod health;
pub mod menu;
pub mod orders;
pub mod tables;
pub mod ws;

/// 每个请求分配一个 UUID 作为 x-request-id
#[derive(Clone)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// 纯路由表，不带中间件和状态
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // 桌台二维码：员工签发 + 顾客解码
        .merge(tables::router())
        // 订单：顾客下单 + 员工流转
        .merge(orders::router())
        // 菜单：顾客浏览 + 管理端维护
        .merge(menu::router())
        // 员工实时通道
        .merge(ws::router())
        // 健康检查，公共路由
        .merge(health::router())
}

/// 路由表加上整套中间件，服务器启动时挂状态后即可 serve
pub fn build_app() -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // 跨域放行，顾客端和控制台是独立前端
        .layer(CorsLayer::permissive())
        // 响应 gzip 压缩
        .layer(CompressionLayer::new())
        // 请求级 tracing span
        .layer(TraceLayer::new_for_http())
        // 生成 x-request-id
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            RequestUuid,
        ))
        // 把 x-request-id 回写到响应头
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
