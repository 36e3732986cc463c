//! 健康探针
//!
//! 员工控制台周期性轮询 `/health`，除了进程存活还要确认
//! 嵌入式存储引擎能正常往返，所以响应里带组件级结果。
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "checks": {
//!     "database": { "status": "ok", "latency_ms": 1 }
//!   }
//! }
//! ```

use std::sync::OnceLock;
use std::time::{Instant, SystemTime};

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 公共路由，无需认证
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// `/health` 响应体
#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy: 全部组件正常；degraded: 至少一项出错
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
}

/// 组件级检查结果集合
#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

/// 单个组件的检查结果，ok 时带延迟，出错时带原因
#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// 进程首次被探测的时刻，uptime 以此为零点
static FIRST_PROBE: OnceLock<SystemTime> = OnceLock::new();

fn uptime_secs() -> u64 {
    FIRST_PROBE
        .get_or_init(SystemTime::now)
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health - 服务与数据库健康状态
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    // 数据库检查走一次真实的引擎往返，顺带量出延迟
    let probe = Instant::now();
    let database = match state.db.health().await {
        Ok(()) => CheckResult {
            status: "ok",
            latency_ms: Some(probe.elapsed().as_millis() as u64),
            message: None,
        },
        Err(e) => CheckResult {
            status: "error",
            latency_ms: None,
            message: Some(format!("Database error: {e}")),
        },
    };

    let status = if database.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_secs(),
        checks: HealthChecks { database },
    })
}
