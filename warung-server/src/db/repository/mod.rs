//! 仓储层
//!
//! 每张 SurrealDB 表一个仓储结构体，订单明细走图遍历查询。
//! 所有查询通过 [`BaseRepository`] 持有的同一个嵌入式连接执行。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

// Location
pub mod dining_table;

// Menu
pub mod menu_item;

// Orders
pub mod order;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;

/// 仓储层错误
#[derive(Debug, Error)]
pub enum RepoError {
    /// 按键或编号查不到记录
    #[error("Record not found: {0}")]
    NotFound(String),

    /// 违反唯一性约束（如桌号重复）
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// 存储引擎返回的错误
    #[error("Storage error: {0}")]
    Database(String),

    /// 写入前的数据校验失败
    #[error("Invalid data: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// 仓储操作的 Result 别名
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用数字记录键
// =============================================================================
//
// 记录键是 snowflake i64（见 utils::snowflake_id），客户端 JSON 直接携带
// 这个数字：
//   - 构造: RecordId::from_table_key("menu_item", 42_i64)
//   - 读取: 投影 record::id(id) AS id 把记录键展平为数字
//   - 写入: 始终以 $rid 绑定 RecordId，避免键被序列化为字符串

/// 持有数据库连接的仓储基座
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
