//! 服务器骨架：配置、进程状态与启动入口
//!
//! [`Config`] 读环境变量，[`ServerState`] 按依赖顺序把数据库和
//! 各服务装配起来，[`Server`] 负责监听与停机。请求处理期的
//! 错误类型不在这里，见 `utils::error`。

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
