//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend), schema bootstrap and seed data

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::db::models::{DiningTableCreate, MenuItemCreate};
use crate::utils::AppError;
use repository::{DiningTableRepository, MenuItemRepository, OrderRepository};

/// Schema bootstrap, idempotent across restarts
const SCHEMA: &str = r#"
-- ============================================
-- Dining tables
-- ============================================
DEFINE TABLE IF NOT EXISTS dining_table SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS table_number ON dining_table TYPE int;
DEFINE FIELD IF NOT EXISTS capacity ON dining_table TYPE int;
DEFINE FIELD IF NOT EXISTS location ON dining_table TYPE string;
DEFINE FIELD IF NOT EXISTS status ON dining_table TYPE string;
DEFINE FIELD IF NOT EXISTS qr_version ON dining_table TYPE int;
DEFINE FIELD IF NOT EXISTS qr_token ON dining_table TYPE option<string>;
DEFINE INDEX IF NOT EXISTS idx_table_number ON dining_table FIELDS table_number UNIQUE;

-- ============================================
-- Menu items
-- ============================================
DEFINE TABLE IF NOT EXISTS menu_item SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON menu_item TYPE string;
DEFINE FIELD IF NOT EXISTS description ON menu_item TYPE string;
DEFINE FIELD IF NOT EXISTS price ON menu_item TYPE number;
DEFINE FIELD IF NOT EXISTS category ON menu_item TYPE string;
DEFINE FIELD IF NOT EXISTS image_url ON menu_item TYPE option<string>;
DEFINE FIELD IF NOT EXISTS available ON menu_item TYPE bool;
DEFINE INDEX IF NOT EXISTS idx_menu_category ON menu_item FIELDS category;

-- ============================================
-- Orders (header) and line items, linked by has_item edges.
-- The header table is customer_order because ORDER is a query keyword.
-- ============================================
DEFINE TABLE IF NOT EXISTS customer_order SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS table_number ON customer_order TYPE int;
DEFINE FIELD IF NOT EXISTS customer_name ON customer_order TYPE string;
DEFINE FIELD IF NOT EXISTS total_amount ON customer_order TYPE number;
DEFINE FIELD IF NOT EXISTS payment_method ON customer_order TYPE string;
DEFINE FIELD IF NOT EXISTS payment_status ON customer_order TYPE string
    ASSERT $value IN ['pending', 'paid'];
DEFINE FIELD IF NOT EXISTS status ON customer_order TYPE string
    ASSERT $value IN ['pending', 'preparing', 'ready', 'completed'];
DEFINE FIELD IF NOT EXISTS created_at ON customer_order TYPE int;
DEFINE INDEX IF NOT EXISTS idx_order_status ON customer_order FIELDS status;
DEFINE INDEX IF NOT EXISTS idx_order_created ON customer_order FIELDS created_at;

DEFINE TABLE IF NOT EXISTS order_item SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS menu_item ON order_item TYPE record<menu_item>;
DEFINE FIELD IF NOT EXISTS quantity ON order_item TYPE int ASSERT $value > 0;
DEFINE FIELD IF NOT EXISTS price ON order_item TYPE number;
DEFINE FIELD IF NOT EXISTS notes ON order_item TYPE string;
DEFINE FIELD IF NOT EXISTS position ON order_item TYPE int;

DEFINE TABLE IF NOT EXISTS has_item TYPE RELATION IN customer_order OUT order_item;
"#;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database under `work_dir/database`
    /// and apply the schema
    pub async fn new(work_dir: &Path) -> Result<Self, AppError> {
        let db_path = work_dir.join("database");
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("warung")
            .use_db("pos")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }

    pub fn dining_tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.db.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    /// Round-trip to the storage engine, used by the health endpoint
    pub async fn health(&self) -> Result<(), surrealdb::Error> {
        self.db.health().await
    }

    /// Seed demo tables and menu on first boot
    ///
    /// 只在对应表为空时写入，重启不会重复造数据。
    pub async fn seed_if_empty(&self) -> Result<(), AppError> {
        let tables = self.dining_tables();
        if tables.count().await? == 0 {
            for table_number in 1..=10i64 {
                // 1-6 dalam ruangan, 7-10 teras; dua meja besar untuk keluarga
                let location = if table_number <= 6 { "Dalam" } else { "Teras" };
                let capacity = if table_number >= 9 { 6 } else { 4 };
                tables
                    .create(DiningTableCreate {
                        table_number,
                        capacity: Some(capacity),
                        location: Some(location.to_string()),
                    })
                    .await?;
            }
            tracing::info!("Seeded 10 dining tables");
        }

        let menu = self.menu_items();
        if menu.count().await? == 0 {
            for (name, description, price, category) in DEMO_MENU {
                menu.create(MenuItemCreate {
                    name: name.to_string(),
                    description: description.to_string(),
                    price: *price,
                    category: category.to_string(),
                    image_url: None,
                    available: true,
                })
                .await?;
            }
            tracing::info!("Seeded {} menu items", DEMO_MENU.len());
        }

        Ok(())
    }
}

/// Demo menu, prices in Rupiah
const DEMO_MENU: &[(&str, &str, f64, &str)] = &[
    (
        "Nasi Goreng Spesial",
        "Nasi goreng dengan ayam, telur, dan kerupuk",
        35000.0,
        "Makanan",
    ),
    (
        "Mie Goreng Jawa",
        "Mie goreng manis pedas khas Jawa",
        30000.0,
        "Makanan",
    ),
    (
        "Ayam Bakar Madu",
        "Ayam bakar dengan olesan madu, sambal terpisah",
        45000.0,
        "Makanan",
    ),
    (
        "Sate Ayam",
        "Sepuluh tusuk dengan bumbu kacang",
        40000.0,
        "Makanan",
    ),
    (
        "Gado-Gado",
        "Sayuran rebus dengan bumbu kacang",
        25000.0,
        "Makanan",
    ),
    ("Es Teh Manis", "Teh hitam manis dengan es", 8000.0, "Minuman"),
    ("Es Jeruk", "Perasan jeruk segar dengan es", 12000.0, "Minuman"),
    (
        "Es Cendol",
        "Cendol dengan santan dan gula merah",
        15000.0,
        "Minuman",
    ),
    (
        "Pisang Goreng",
        "Lima potong, disajikan hangat",
        15000.0,
        "Camilan",
    ),
    (
        "Klepon",
        "Kue isi gula merah dengan kelapa parut",
        10000.0,
        "Penutup",
    ),
];
