//! 应用错误与 HTTP 映射
//!
//! 处理器统一返回 [`AppResult`]，错误在这一层换算成状态码和
//! `{code, message}` 响应体。下层错误（仓储、令牌、状态机）通过
//! `From` 收敛进 [`AppError`]，处理器里一个 `?` 就够了。
//!
//! 错误码沿用 E 前缀分段：E0xxx 业务（E0003 不存在），E3xxx 扫码
//! 令牌（E3002 无效二维码），E9xxx 系统（E9002 数据库）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;
use crate::orders::status::TransitionError;
use crate::token::TokenError;

/// 错误响应体，`{"code": "E0003", "message": "Order 42 not found"}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// 应用错误枚举
///
/// 4xx 把细节原样给客户端；5xx 只回笼统的一句，细节进日志。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 扫码令牌无效：格式错、超过有效期或已被换发 (400)
    #[error("Invalid or expired QR code")]
    InvalidToken,

    /// 资源不存在 (404)，消息本身已是完整句子
    #[error("{0}")]
    NotFound(String),

    /// 请求数据校验失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 订单状态流转违规 (400)
    #[error("{0}")]
    InvalidTransition(String),

    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 其他内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // 令牌问题一律同一句话，不向顾客区分子原因
            AppError::InvalidToken => {
                (StatusCode::BAD_REQUEST, "E3002", "Invalid or expired QR code")
            }

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            AppError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, "E0005", msg.as_str()),

            // 5xx：先记日志，响应里不带内部细节
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::InvalidTransition(e.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed(_) | TokenError::Expired => AppError::InvalidToken,
            TokenError::GenerationFailed(msg) => AppError::Internal(msg),
        }
    }
}

// 便捷构造函数，省去调用侧的 .into()/.to_string()
impl AppError {
    /// 统一的无效令牌错误，格式错、过期、已换发共用一条响应
    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = std::result::Result<T, AppError>;
