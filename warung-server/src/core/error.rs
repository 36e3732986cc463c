use thiserror::Error;

/// 启动阶段错误
///
/// 请求处理阶段的错误用 [`crate::utils::AppError`]，
/// 这里只覆盖监听、绑定等启动失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
