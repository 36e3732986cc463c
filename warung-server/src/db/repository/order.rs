//! Order Repository (Graph Model)
//!
//! 订单头存 `customer_order` 表（ORDER 是查询关键字，表名避开它），
//! 行项目存 `order_item` 表，两者通过 `has_item` 边关联。
//! 读取用图遍历子查询一次取回订单和行项目。

use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoResult};
use crate::db::models::{OrderDetail, OrderDraft};
use crate::orders::status::OrderStatus;
use crate::utils::{now_millis, snowflake_id};

const TABLE: &str = "customer_order";

/// 订单详情投影：记录键展平为数字 id，行项目经 has_item 边取回，
/// 菜品名称通过记录链接解析（菜品被删除时为 NONE）
const DETAIL_PROJECTION: &str = r#"
    record::id(id) AS id,
    table_number,
    customer_name,
    total_amount,
    payment_method,
    payment_status,
    status,
    created_at,
    (
        SELECT
            menu_item.name AS name,
            quantity,
            price,
            notes
        FROM ->has_item->order_item
        ORDER BY position
    ) AS items
"#;

/// 事务：订单头和全部行项目要么一起落库，要么一起回滚
const CREATE_ORDER: &str = r#"
    BEGIN TRANSACTION;
    CREATE ONLY $rid SET
        table_number = $table_number,
        customer_name = $customer_name,
        total_amount = $total_amount,
        payment_method = $payment_method,
        payment_status = $payment_status,
        status = $status,
        created_at = $created_at;
    FOR $item IN $items {
        LET $row = CREATE ONLY order_item SET
            menu_item = type::thing('menu_item', $item.menu_item_id),
            quantity = $item.quantity,
            price = $item.price,
            notes = $item.notes,
            position = $item.position;
        RELATE $rid->has_item->$row;
    };
    COMMIT TRANSACTION;
"#;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an order together with its line items in one transaction
    ///
    /// Any statement failure (for example a schema assertion on one of the
    /// line items) rolls back the order header and every item row.
    pub async fn create(&self, draft: OrderDraft) -> RepoResult<i64> {
        let id = snowflake_id();

        let items: Vec<ItemBind> = draft
            .items
            .into_iter()
            .enumerate()
            .map(|(position, item)| ItemBind {
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
                price: item.price,
                notes: item.notes,
                position: position as i32,
            })
            .collect();

        self.base
            .db()
            .query(CREATE_ORDER)
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("table_number", draft.table_number))
            .bind(("customer_name", draft.customer_name))
            .bind(("total_amount", draft.total_amount))
            .bind(("payment_method", draft.payment_method))
            .bind(("payment_status", draft.payment_status))
            .bind(("status", OrderStatus::Pending))
            .bind(("created_at", now_millis()))
            .bind(("items", items))
            .await?
            .check()?;

        Ok(id)
    }

    /// Get full order detail using graph traversal
    pub async fn find_detail(&self, id: i64) -> RepoResult<Option<OrderDetail>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_PROJECTION} FROM customer_order WHERE id = $rid"
            ))
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .await?;
        let details: Vec<OrderDetail> = result.take(0)?;
        Ok(details.into_iter().next())
    }

    /// List order details newest first, optionally filtered by status
    pub async fn list_details(&self, status: Option<OrderStatus>) -> RepoResult<Vec<OrderDetail>> {
        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {DETAIL_PROJECTION} FROM customer_order WHERE status = $status ORDER BY created_at DESC"
                    ))
                    .bind(("status", status))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {DETAIL_PROJECTION} FROM customer_order ORDER BY created_at DESC"
                    ))
                    .await?
            }
        };
        let details: Vec<OrderDetail> = result.take(0)?;
        Ok(details)
    }

    /// Set order status
    ///
    /// Returns the number of rows touched; 0 means the order does not exist.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $rid SET status = $status")
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("status", status))
            .await?;
        let updated: Vec<StatusRow> = result.take(0)?;
        Ok(updated.len())
    }

    /// Number of order_item rows across all orders
    pub async fn count_items(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM order_item GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }
}

/// Line item shape bound into the create transaction
#[derive(Debug, Serialize)]
struct ItemBind {
    menu_item_id: i64,
    quantity: i32,
    price: f64,
    notes: String,
    position: i32,
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    #[allow(dead_code)]
    status: OrderStatus,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: i64,
}
