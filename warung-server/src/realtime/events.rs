//! Wire protocol for the staff realtime channel
//!
//! Tagged JSON frames, `event` carries the name and `data` the payload:
//!
//! ```json
//! { "event": "join-kitchen" }
//! { "event": "user-online", "data": "budi" }
//! { "event": "new-order", "data": { "id": 42, "status": "pending" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::db::models::OrderDetail;

/// Client → server frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinCashier,
    JoinKitchen,
    JoinAdmin,
    /// Staff user id announcing itself for presence
    UserOnline(String),
}

/// Server → client frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    NewOrder(OrderDetail),
    OrderUpdated(OrderDetail),
    UsersOnlineUpdate(Vec<String>),
}
