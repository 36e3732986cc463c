//! Order Module
//!
//! 下单与订单状态流转的编排层。
//!
//! # 下单流程
//!
//! 1. 解码桌台令牌并核对当前版本（凭证先行，伪造请求不触库）
//! 2. 用 decimal 校验行项目与订单总额
//! 3. 订单头 + 行项目在单个事务里落库
//! 4. 事务提交后向收银台和后厨广播 `new-order`
//!
//! 状态流转同样先校验合法性再写库，确认写入后才广播 `order-updated`。

pub mod money;
pub mod status;

use serde::Deserialize;

pub use status::{OrderStatus, PaymentStatus, TransitionError};

use crate::db::models::{OrderDetail, OrderDraft, OrderItemDraft};
use crate::db::repository::OrderRepository;
use crate::realtime::{Group, Hub, ServerEvent};
use crate::tables::TableService;
use crate::utils::{AppError, AppResult};

/// 顾客下单请求体
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    /// 桌台令牌，来自扫码后的下单页
    pub token: String,
    pub table_number: i64,
    #[serde(default)]
    pub customer_name: String,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    /// 客户端声明的订单总额，服务端会重算核对
    pub total_amount: f64,
    pub items: Vec<OrderItemInput>,
}

/// 下单请求里的单个行项目
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub notes: String,
}

/// 订单服务
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    tables: TableService,
    hub: Hub,
}

impl OrderService {
    pub fn new(orders: OrderRepository, tables: TableService, hub: Hub) -> Self {
        Self {
            orders,
            tables,
            hub,
        }
    }

    /// 受理顾客下单，返回新订单号
    ///
    /// 落库的总额是服务端按行项目重算的金额，
    /// 客户端声明值只用于一致性核对。
    pub async fn place(&self, payload: PlaceOrder) -> AppResult<i64> {
        let table = self.tables.resolve(&payload.token).await?;
        if table.table_number != payload.table_number {
            tracing::debug!(
                token_table = table.table_number,
                claimed_table = payload.table_number,
                "Order rejected: token does not match claimed table"
            );
            return Err(AppError::invalid_token());
        }

        money::validate_order(&payload.items, payload.total_amount)?;

        let draft = OrderDraft {
            table_number: payload.table_number,
            customer_name: payload.customer_name,
            total_amount: money::to_f64(money::order_total(&payload.items)),
            payment_method: payload.payment_method,
            payment_status: payload.payment_status,
            items: payload
                .items
                .into_iter()
                .map(|item| OrderItemDraft {
                    menu_item_id: item.menu_item_id,
                    quantity: item.quantity,
                    price: item.price,
                    notes: item.notes,
                })
                .collect(),
        };

        let order_id = self.orders.create(draft).await?;

        // 只广播已提交的订单
        if let Some(detail) = self.orders.find_detail(order_id).await? {
            self.hub.publish(Group::Cashier, &ServerEvent::NewOrder(detail.clone()));
            self.hub.publish(Group::Kitchen, &ServerEvent::NewOrder(detail));
        }

        tracing::info!(order_id, table_number = payload.table_number, "Order placed");

        Ok(order_id)
    }

    /// 订单列表，最新在前，可按状态过滤
    pub async fn list(&self, status: Option<OrderStatus>) -> AppResult<Vec<OrderDetail>> {
        Ok(self.orders.list_details(status).await?)
    }

    /// 按订单号取详情
    pub async fn get(&self, id: i64) -> AppResult<OrderDetail> {
        self.orders
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))
    }

    /// 订单状态流转，成功后广播 `order-updated`
    ///
    /// 只放行状态机定义的单步推进，写入确认后才广播。
    pub async fn transition(&self, id: i64, requested: OrderStatus) -> AppResult<OrderDetail> {
        let current = self.get(id).await?;
        status::validate_transition(current.status, requested)?;

        let affected = self.orders.update_status(id, requested).await?;
        if affected == 0 {
            return Err(AppError::not_found(format!("Order {id} not found")));
        }

        let detail = self.get(id).await?;
        self.hub
            .publish(Group::Cashier, &ServerEvent::OrderUpdated(detail.clone()));
        self.hub
            .publish(Group::Kitchen, &ServerEvent::OrderUpdated(detail.clone()));

        tracing::info!(order_id = id, status = %requested, "Order status changed");

        Ok(detail)
    }
}
