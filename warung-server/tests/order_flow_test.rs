//! 扫码点餐全流程测试 - 完整 ServerState 下的二维码、下单与广播
//!
//! Run: cargo test -p warung-server --test order_flow_test

use tokio::sync::mpsc;
use uuid::Uuid;

use warung_server::orders::{OrderItemInput, OrderStatus, PaymentStatus, PlaceOrder};
use warung_server::realtime::Group;
use warung_server::{AppError, Config, ServerState};

/// 完整初始化一个带演示数据的服务器状态
async fn test_state() -> (tempfile::TempDir, ServerState) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (tmp, state)
}

/// 注册一个已加入指定分组的接收端
fn subscribe(state: &ServerState, group: Group) -> (Uuid, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let conn_id = state.hub.register(tx);
    state.hub.join(conn_id, group);
    (conn_id, rx)
}

fn order_payload(token: &str, table_number: i64, items: Vec<OrderItemInput>, total: f64) -> PlaceOrder {
    PlaceOrder {
        token: token.to_string(),
        table_number,
        customer_name: "Siti".to_string(),
        payment_method: "qris".to_string(),
        payment_status: PaymentStatus::Paid,
        total_amount: total,
        items,
    }
}

fn item(menu_item_id: i64, quantity: i32, price: f64) -> OrderItemInput {
    OrderItemInput {
        menu_item_id,
        quantity,
        price,
        notes: String::new(),
    }
}

#[tokio::test]
async fn qr_regeneration_kills_old_tokens_and_fresh_token_orders() {
    let (_tmp, state) = test_state().await;

    // 首次查询懒签发第一版二维码
    let first = state.tables.get_or_issue(3).await.unwrap();
    assert!(!first.existed);
    assert_eq!(first.version, 1);
    assert!(first.url.ends_with(&format!("/order?token={}", first.token)));

    // 重复查询幂等，返回同一令牌
    let again = state.tables.get_or_issue(3).await.unwrap();
    assert!(again.existed);
    assert_eq!(again.token, first.token);

    // 顾客扫码解析
    let resolved = state.tables.resolve(&first.token).await.unwrap();
    assert_eq!(resolved.table_number, 3);

    // 桌台换发，版本 +1
    let fresh = state.tables.regenerate(3).await.unwrap();
    assert_eq!(fresh.version, 2);
    assert_ne!(fresh.token, first.token);

    // 旧令牌立即失效
    let err = state.tables.resolve(&first.token).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));

    let menu = state.db.menu_items().find_available().await.unwrap();
    let snack = menu.iter().find(|m| m.price == 15000.0).unwrap();

    // 旧令牌下单同样被拒
    let err = state
        .orders
        .place(order_payload(
            &first.token,
            3,
            vec![item(snack.id, 2, snack.price)],
            30000.0,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));

    let (_cashier_id, mut cashier_rx) = subscribe(&state, Group::Cashier);
    let (_kitchen_id, mut kitchen_rx) = subscribe(&state, Group::Kitchen);

    // 重扫后的新令牌下单成功
    let order_id = state
        .orders
        .place(order_payload(
            &fresh.token,
            3,
            vec![item(snack.id, 2, snack.price)],
            30000.0,
        ))
        .await
        .unwrap();

    // 收银台和后厨都收到 new-order，金额一致
    for rx in [&mut cashier_rx, &mut kitchen_rx] {
        let frame: serde_json::Value =
            serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["event"], "new-order");
        assert_eq!(frame["data"]["id"].as_i64(), Some(order_id));
        assert_eq!(frame["data"]["table_number"].as_i64(), Some(3));
        assert_eq!(frame["data"]["total_amount"].as_f64(), Some(30000.0));
    }

    // 落库的总额是服务端重算的金额
    let detail = state.orders.get(order_id).await.unwrap();
    assert_eq!(detail.status, OrderStatus::Pending);
    assert_eq!(detail.payment_status, PaymentStatus::Paid);
    assert_eq!(detail.total_amount, 30000.0);
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].name, snack.name);
    assert_eq!(detail.items[0].quantity, 2);
}

#[tokio::test]
async fn status_flow_is_single_step_and_broadcast_after_write() {
    let (_tmp, state) = test_state().await;

    let qr = state.tables.get_or_issue(2).await.unwrap();
    let menu = state.db.menu_items().find_available().await.unwrap();
    let a = &menu[0];

    let order_id = state
        .orders
        .place(order_payload(
            &qr.token,
            2,
            vec![item(a.id, 1, a.price)],
            a.price,
        ))
        .await
        .unwrap();

    let (_conn, mut kitchen_rx) = subscribe(&state, Group::Kitchen);

    // pending -> ready 跳步，必须拒绝且不广播
    let err = state
        .orders
        .transition(order_id, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
    assert!(kitchen_rx.try_recv().is_err());

    // 不存在的订单
    let err = state
        .orders
        .transition(999_999, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // 合法单步推进，确认写入后广播
    let detail = state
        .orders
        .transition(order_id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(detail.status, OrderStatus::Preparing);

    let frame: serde_json::Value =
        serde_json::from_str(&kitchen_rx.try_recv().unwrap()).unwrap();
    assert_eq!(frame["event"], "order-updated");
    assert_eq!(frame["data"]["status"], "preparing");

    // 推进到头之后不能再动
    state
        .orders
        .transition(order_id, OrderStatus::Ready)
        .await
        .unwrap();
    state
        .orders
        .transition(order_id, OrderStatus::Completed)
        .await
        .unwrap();
    let err = state
        .orders
        .transition(order_id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn forged_or_inconsistent_checkouts_never_reach_the_store() {
    let (_tmp, state) = test_state().await;

    let qr = state.tables.get_or_issue(5).await.unwrap();
    let menu = state.db.menu_items().find_available().await.unwrap();
    let a = &menu[0];

    // 令牌属于 5 号桌，请求声称 6 号桌
    let err = state
        .orders
        .place(order_payload(
            &qr.token,
            6,
            vec![item(a.id, 1, a.price)],
            a.price,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidToken));

    // 声明总额与行项目不符
    let err = state
        .orders
        .place(order_payload(
            &qr.token,
            5,
            vec![item(a.id, 1, a.price)],
            a.price + 1000.0,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // 空订单
    let err = state
        .orders
        .place(order_payload(&qr.token, 5, vec![], 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // 数量为 0 在金额校验阶段就被拦下
    let err = state
        .orders
        .place(order_payload(
            &qr.token,
            5,
            vec![item(a.id, 0, a.price)],
            0.0,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(state.orders.list(None).await.unwrap().len(), 0);
}

#[tokio::test]
async fn demo_seed_runs_once_and_lays_out_the_floor() {
    let (_tmp, state) = test_state().await;

    let tables = state.db.dining_tables();
    assert_eq!(tables.count().await.unwrap(), 10);

    // 1-6 在室内，7-10 在外摆区，九号十号是家庭大桌
    let inside = tables.find_by_number(1).await.unwrap().unwrap();
    assert_eq!(inside.location, "Dalam");
    assert_eq!(inside.capacity, 4);

    let terrace = tables.find_by_number(9).await.unwrap().unwrap();
    assert_eq!(terrace.location, "Teras");
    assert_eq!(terrace.capacity, 6);

    let menu = state.db.menu_items().find_all().await.unwrap();
    assert!(!menu.is_empty());

    // 二次初始化不得重复造数据
    state.db.seed_if_empty().await.unwrap();
    assert_eq!(tables.count().await.unwrap(), 10);
    assert_eq!(state.db.menu_items().find_all().await.unwrap().len(), menu.len());
}
