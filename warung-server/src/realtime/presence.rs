//! Staff presence tracking for the admin online/offline indicators

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::utils::now_millis;

/// Which connection announced the user, and when
#[derive(Debug, Clone)]
struct PresenceEntry {
    conn_id: Uuid,
    connected_at: i64,
}

/// 在线员工登记表 — user id 映射到最近一次宣告的连接
#[derive(Clone, Default)]
pub struct PresenceTracker {
    entries: Arc<DashMap<String, PresenceEntry>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user online
    ///
    /// 同一用户再次登录会覆盖旧条目（last connect wins），不做引用计数。
    pub fn mark_online(&self, user_id: &str, conn_id: Uuid) {
        self.entries.insert(
            user_id.to_string(),
            PresenceEntry {
                conn_id,
                connected_at: now_millis(),
            },
        );
    }

    /// Remove every entry announced by `conn_id`
    ///
    /// Returns true when presence actually changed, so the caller knows
    /// whether to re-broadcast the online list. A user who re-announced
    /// from a newer connection stays online when the old one closes.
    pub fn mark_offline(&self, conn_id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.conn_id != conn_id);
        self.entries.len() != before
    }

    /// Currently online user ids, sorted for stable output
    pub fn list_online(&self) -> Vec<String> {
        let mut users: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        users.sort();
        users
    }

    /// Unix millis of the user's latest announcement
    pub fn online_since(&self, user_id: &str) -> Option<i64> {
        self.entries.get(user_id).map(|e| e.connected_at)
    }
}
