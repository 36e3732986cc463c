use std::path::Path;

use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;
use crate::realtime::{Hub, PresenceTracker};
use crate::tables::TableService;
use crate::token::TokenCodec;

/// 进程级服务注册表
///
/// 数据库句柄和各服务都在这里，字段全是浅拷贝友好的共享引用，
/// `with_state` 注入后处理器按字段取用。没有全局单例，测试可以
/// 并行建多个互不相干的实例。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库服务
    pub db: DbService,
    /// 桌台二维码服务
    pub tables: TableService,
    /// 订单服务
    pub orders: OrderService,
    /// 实时连接注册表
    pub hub: Hub,
    /// 在线员工登记表
    pub presence: PresenceTracker,
}

impl ServerState {
    /// 从配置装配整套进程状态
    ///
    /// 先建工作目录和数据库（含 schema），空库时按需写入演示
    /// 数据，随后把令牌编解码器与各服务接起来。
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic。
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir()
            .expect("Failed to create work directory");

        let db = DbService::new(Path::new(&config.work_dir))
            .await
            .expect("Failed to initialize database");

        if config.seed_demo_data {
            db.seed_if_empty().await.expect("Failed to seed demo data");
        }

        let hub = Hub::new();
        let presence = PresenceTracker::new();
        let tables = TableService::new(
            db.dining_tables(),
            TokenCodec::new(),
            config.public_base_url.clone(),
        );
        let orders = OrderService::new(db.orders(), tables.clone(), hub.clone());

        Self {
            config: config.clone(),
            db,
            tables,
            orders,
            hub,
            presence,
        }
    }
}
