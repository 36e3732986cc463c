//! 订单与菜单存储层测试 - 嵌入式 RocksDB 上的真实读写
//!
//! Run: cargo test -p warung-server --test order_store_test

use warung_server::db::DbService;
use warung_server::db::models::{
    DiningTableCreate, MenuItemCreate, MenuItemUpdate, OrderDraft, OrderItemDraft,
};
use warung_server::db::repository::RepoError;
use warung_server::orders::{OrderStatus, PaymentStatus};

/// 每个测试一个独立的临时库，TempDir 活到测试结束
async fn test_db() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    (tmp, db)
}

fn menu_item(name: &str, price: f64, category: &str) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: String::new(),
        price,
        category: category.to_string(),
        image_url: None,
        available: true,
    }
}

fn draft(table_number: i64, items: Vec<OrderItemDraft>, total: f64) -> OrderDraft {
    OrderDraft {
        table_number,
        customer_name: "Budi".to_string(),
        total_amount: total,
        payment_method: "cash".to_string(),
        payment_status: PaymentStatus::Pending,
        items,
    }
}

fn line(menu_item_id: i64, quantity: i32, price: f64) -> OrderItemDraft {
    OrderItemDraft {
        menu_item_id,
        quantity,
        price,
        notes: String::new(),
    }
}

#[tokio::test]
async fn order_persists_header_and_line_items() {
    let (_tmp, db) = test_db().await;

    let nasi = db
        .menu_items()
        .create(menu_item("Nasi Goreng", 35000.0, "Makanan"))
        .await
        .unwrap();
    let teh = db
        .menu_items()
        .create(menu_item("Es Teh", 8000.0, "Minuman"))
        .await
        .unwrap();

    let orders = db.orders();
    let id = orders
        .create(draft(
            3,
            vec![line(nasi.id, 2, 35000.0), line(teh.id, 1, 8000.0)],
            78000.0,
        ))
        .await
        .unwrap();

    let detail = orders.find_detail(id).await.unwrap().unwrap();
    assert_eq!(detail.id, id);
    assert_eq!(detail.table_number, 3);
    assert_eq!(detail.customer_name, "Budi");
    assert_eq!(detail.status, OrderStatus::Pending);
    assert_eq!(detail.payment_status, PaymentStatus::Pending);
    assert!(detail.created_at > 0);

    // 行项目按下单顺序返回，名称通过记录链接解析
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].name, "Nasi Goreng");
    assert_eq!(detail.items[0].quantity, 2);
    assert_eq!(detail.items[1].name, "Es Teh");
    assert_eq!(detail.items[1].price, 8000.0);
}

#[tokio::test]
async fn rejected_line_item_aborts_the_whole_order() {
    let (_tmp, db) = test_db().await;

    let nasi = db
        .menu_items()
        .create(menu_item("Nasi Goreng", 35000.0, "Makanan"))
        .await
        .unwrap();

    let orders = db.orders();
    let before = orders.count_items().await.unwrap();

    // 三行中第二行 quantity = 0 违反 order_item 的字段断言，
    // 整个事务必须回滚，已写入的第一行也一并丢弃
    let result = orders
        .create(draft(
            2,
            vec![
                line(nasi.id, 1, 35000.0),
                line(nasi.id, 0, 35000.0),
                line(nasi.id, 2, 35000.0),
            ],
            105000.0,
        ))
        .await;
    assert!(result.is_err());

    // 订单头和合法的那一行都不能落库
    assert_eq!(orders.list_details(None).await.unwrap().len(), 0);
    assert_eq!(orders.count_items().await.unwrap(), before);
}

#[tokio::test]
async fn list_orders_newest_first_with_status_filter() {
    let (_tmp, db) = test_db().await;

    let nasi = db
        .menu_items()
        .create(menu_item("Nasi Goreng", 35000.0, "Makanan"))
        .await
        .unwrap();

    let orders = db.orders();
    let first = orders
        .create(draft(1, vec![line(nasi.id, 1, 35000.0)], 35000.0))
        .await
        .unwrap();
    let second = orders
        .create(draft(2, vec![line(nasi.id, 1, 35000.0)], 35000.0))
        .await
        .unwrap();

    orders
        .update_status(first, OrderStatus::Preparing)
        .await
        .unwrap();

    let all = orders.list_details(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].created_at >= all[1].created_at);

    let pending = orders
        .list_details(Some(OrderStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second);

    let preparing = orders
        .list_details(Some(OrderStatus::Preparing))
        .await
        .unwrap();
    assert_eq!(preparing.len(), 1);
    assert_eq!(preparing[0].id, first);
}

#[tokio::test]
async fn update_status_reports_affected_rows() {
    let (_tmp, db) = test_db().await;

    let nasi = db
        .menu_items()
        .create(menu_item("Nasi Goreng", 35000.0, "Makanan"))
        .await
        .unwrap();

    let orders = db.orders();
    let id = orders
        .create(draft(1, vec![line(nasi.id, 1, 35000.0)], 35000.0))
        .await
        .unwrap();

    assert_eq!(
        orders.update_status(id, OrderStatus::Preparing).await.unwrap(),
        1
    );
    assert_eq!(
        orders.update_status(999_999, OrderStatus::Preparing).await.unwrap(),
        0
    );

    let detail = orders.find_detail(id).await.unwrap().unwrap();
    assert_eq!(detail.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn menu_update_merges_missing_fields() {
    let (_tmp, db) = test_db().await;
    let menu = db.menu_items();

    let item = menu
        .create(menu_item("Sate Ayam", 40000.0, "Makanan"))
        .await
        .unwrap();

    // 只改价格，其余字段保持原值
    let updated = menu
        .update(
            item.id,
            MenuItemUpdate {
                name: None,
                description: None,
                price: Some(42000.0),
                category: None,
                image_url: None,
                available: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Sate Ayam");
    assert_eq!(updated.price, 42000.0);
    assert!(updated.available);

    let toggled = menu.toggle_available(item.id).await.unwrap();
    assert!(!toggled.available);

    // 顾客端列表只看得到可售项
    assert_eq!(menu.find_available().await.unwrap().len(), 0);
    assert_eq!(menu.find_all().await.unwrap().len(), 1);

    assert!(menu.delete(item.id).await.unwrap());
    assert!(!menu.delete(item.id).await.unwrap());
}

#[tokio::test]
async fn table_numbers_are_unique() {
    let (_tmp, db) = test_db().await;
    let tables = db.dining_tables();

    tables
        .create(DiningTableCreate {
            table_number: 7,
            capacity: Some(4),
            location: Some("Teras".to_string()),
        })
        .await
        .unwrap();

    let err = tables
        .create(DiningTableCreate {
            table_number: 7,
            capacity: None,
            location: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn qr_state_round_trips_through_the_store() {
    let (_tmp, db) = test_db().await;
    let tables = db.dining_tables();

    let table = tables
        .create(DiningTableCreate {
            table_number: 4,
            capacity: None,
            location: None,
        })
        .await
        .unwrap();
    assert_eq!(table.qr_version, 0);
    assert!(table.qr_token.is_none());
    assert_eq!(table.status, "available");

    let updated = tables.set_qr(table.id, 1, "token-abc").await.unwrap();
    assert_eq!(updated.qr_version, 1);
    assert_eq!(updated.qr_token.as_deref(), Some("token-abc"));

    let found = tables.find_by_number(4).await.unwrap().unwrap();
    assert_eq!(found.qr_token.as_deref(), Some("token-abc"));

    let seeded = db.seed_if_empty().await;
    assert!(seeded.is_ok());
    // 桌台已存在，演示数据不能重复写入
    assert_eq!(tables.count().await.unwrap(), 1);
}
