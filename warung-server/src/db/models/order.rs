//! Order Models
//!
//! 读模型由列表/详情投影决定形状：记录键被展平为 `id`，
//! 行项目通过 `has_item` 边的子查询取回。

use serde::{Deserialize, Serialize};

use crate::orders::status::{OrderStatus, PaymentStatus};

/// Order detail as served to clients and broadcast over WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    /// Record key (snowflake)
    pub id: i64,
    pub table_number: i64,
    #[serde(default)]
    pub customer_name: String,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
    #[serde(default)]
    pub items: Vec<OrderItemDetail>,
}

/// Line item inside [`OrderDetail`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    /// Menu item name resolved through the record link; empty when the
    /// menu item was deleted after the order was placed
    #[serde(default)]
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub notes: String,
}

/// New order payload handed to the repository
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub table_number: i64,
    pub customer_name: String,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub items: Vec<OrderItemDraft>,
}

/// Line item inside [`OrderDraft`]
#[derive(Debug, Clone)]
pub struct OrderItemDraft {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub price: f64,
    pub notes: String,
}
