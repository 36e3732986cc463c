use warung_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // dotenv 和日志要在一切输出之前装好
    setup_environment()?;
    print_banner();

    let config = Config::from_env();
    tracing::info!("🍛 Warung server starting on port {}", config.http_port);

    // 数据库、演示数据与各服务按依赖顺序初始化
    let state = ServerState::initialize(&config).await;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
