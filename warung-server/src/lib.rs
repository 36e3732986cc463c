//! Warung Server - 扫码点餐的餐厅 POS 服务端
//!
//! 顾客扫桌台二维码下单，收银台和后厨经 WebSocket 实时接单，
//! 管理端维护菜单并换发二维码。单进程单库，嵌入式 SurrealDB，
//! 不依赖任何外部服务。
//!
//! ```text
//! warung-server/src/
//! ├── core/       配置、进程状态、启动
//! ├── api/        HTTP 路由与处理器
//! ├── db/         模型、仓储、建库与演示数据
//! ├── orders/     下单编排、金额校验、状态机
//! ├── tables/     桌台二维码生命周期
//! ├── token/      令牌编解码
//! ├── realtime/   分组广播与在线登记
//! └── utils/      错误、日志、ID 生成
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod realtime;
pub mod tables;
pub mod token;
pub mod utils;

// 对外暴露的核心类型
pub use crate::core::{Config, Server, ServerState};
pub use orders::{OrderService, OrderStatus, PaymentStatus};
pub use realtime::{Group, Hub, PresenceTracker};
pub use tables::TableService;
pub use token::{TableToken, TokenCodec};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
 _       __
| |     / /___ _______  ______  ____ _
| | /| / / __ `/ ___/ / / / __ \/ __ `/
| |/ |/ / /_/ / /  / /_/ / / / / /_/ /
|__/|__/\__,_/_/   \__,_/_/ /_/\__, /
                              /____/
    "#
    );
}

/// 准备进程环境：加载 .env、初始化日志
///
/// 设置 `LOG_DIR` 时日志按天滚动写入该目录，否则输出到 stdout。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.is_empty() => {
            std::fs::create_dir_all(&dir)?;
            init_logger_with_file(None, Some(&dir));
        }
        _ => init_logger(),
    }

    Ok(())
}
