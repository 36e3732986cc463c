//! 日志初始化
//!
//! `tracing` 订阅器的统一装配：默认打到 stdout，给了日志目录
//! 就换成按天滚动的文件输出。过滤规则优先读 `RUST_LOG`。

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// 以默认配置初始化（info 级别，stdout）
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// 初始化日志，可选写入文件
///
/// `log_level` 只在 `RUST_LOG` 未设置时生效；`log_dir` 指向的目录
/// 必须已存在，否则回落到 stdout。
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warung_server={level},tower_http={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir {
        let dir_path = Path::new(dir);
        if dir_path.exists()
            && let Some(dir_str) = dir_path.to_str()
        {
            // 文件名形如 warung-server.2026-08-25
            let appender = tracing_appender::rolling::daily(dir_str, "warung-server");
            builder.with_writer(appender).init();
            return;
        }
    }

    builder.init();
}
