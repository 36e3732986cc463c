//! 连接注册表与分组广播
//!
//! ```text
//! WS handler ──register()──▶ Hub
//!     │                       └── connections: conn_id → (出站队列, 已加入的组)
//!     │ join(conn_id, group)
//!     ▼
//! OrderService ──publish(group, event)──▶ 组内每个连接的 mpsc 队列
//! ```
//!
//! 投递语义：至多一次，不落盘不重放。断线客户端错过的事件
//! 由其重连后的全量拉取弥补。

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::events::ServerEvent;

/// Subscriber groups, a fixed enumeration
///
/// A connection may join several groups; none is joined implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Cashier,
    Kitchen,
    Admin,
}

/// 单个连接：出站队列 + 已加入的组
struct Connection {
    tx: mpsc::UnboundedSender<String>,
    groups: HashSet<Group>,
}

/// 进程级连接注册表 — 启动时创建一次，经 AppState 传入各处
#[derive(Clone, Default)]
pub struct Hub {
    connections: Arc<DashMap<Uuid, Connection>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound queue, returns its identity
    pub fn register(&self, tx: mpsc::UnboundedSender<String>) -> Uuid {
        let conn_id = Uuid::new_v4();
        self.connections.insert(
            conn_id,
            Connection {
                tx,
                groups: HashSet::new(),
            },
        );
        conn_id
    }

    /// Join a group; joining twice is a no-op
    pub fn join(&self, conn_id: Uuid, group: Group) {
        if let Some(mut conn) = self.connections.get_mut(&conn_id) {
            conn.groups.insert(group);
        }
    }

    /// Drop a connection and all its group memberships
    pub fn remove(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    /// Broadcast an event to every connection currently in `group`
    ///
    /// 序列化一次，投递到每个成员的无界队列，从不等待慢客户端。
    /// 返回实际投递数；发送失败说明对端已断开，连接随手移除。
    pub fn publish(&self, group: Group, event: &ServerEvent) -> usize {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize realtime event: {e}");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut stale: Vec<Uuid> = Vec::new();
        for entry in self.connections.iter() {
            if !entry.value().groups.contains(&group) {
                continue;
            }
            if entry.value().tx.send(json.clone()).is_ok() {
                delivered += 1;
            } else {
                stale.push(*entry.key());
            }
        }

        // 迭代中不能删（DashMap 会死锁），收集后再移除
        for conn_id in stale {
            self.connections.remove(&conn_id);
        }

        delivered
    }

    /// Number of live connections across all groups
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
