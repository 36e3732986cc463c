//! HTTP 服务器装配与生命周期
//!
//! 绑定监听地址，挂上 API 路由与中间件；收到 ctrl-c 后优雅停机。

use std::net::SocketAddr;

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 复用已初始化好的状态（主程序先建状态再启动服务器）
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        // 没有预置状态就在这里初始化
        let state = if let Some(state) = &self.state {
            state.clone()
        } else {
            ServerState::initialize(&self.config).await
        };

        let app = api::build_app().with_state(state);

        let addr: SocketAddr = format!("{}:{}", self.config.http_host, self.config.http_port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::Internal(e.into()))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🍛 Warung server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        Ok(())
    }
}
