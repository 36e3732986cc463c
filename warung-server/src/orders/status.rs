//! 订单状态机
//!
//! 订单生命周期: `pending → preparing → ready → completed`
//!
//! 每个状态只有一个合法后继，不允许跳步、回退或原地流转。
//! `completed` 是终态。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// 已下单，等待厨房接单
    Pending,
    /// 制作中
    Preparing,
    /// 待取餐
    Ready,
    /// 已完成
    Completed,
}

impl OrderStatus {
    /// 当前状态的唯一合法后继
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// 是否允许流转到指定状态
    pub fn can_transition_to(self, requested: OrderStatus) -> bool {
        self.next() == Some(requested)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 支付状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// 未支付（餐后付款）
    Pending,
    /// 已支付
    Paid,
}

/// 非法状态流转，携带当前状态和请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot change order status from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// 校验一次状态流转请求
pub fn validate_transition(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<(), TransitionError> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(TransitionError {
            from: current,
            to: requested,
        })
    }
}
