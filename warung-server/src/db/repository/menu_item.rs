//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::snowflake_id;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

/// 菜品字段投影，记录键展平为数字 id
const PROJECTION: &str =
    "record::id(id) AS id, name, description, price, category, image_url, available";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items, grouped for the admin screen
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM menu_item ORDER BY category, name"
            ))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu items currently orderable by guests
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM menu_item WHERE available = true ORDER BY category, name"
            ))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by record key
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PROJECTION} FROM menu_item WHERE id = $rid"))
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let id = snowflake_id();
        self.base
            .db()
            .query(
                "CREATE ONLY $rid SET \
                 name = $name, \
                 description = $description, \
                 price = $price, \
                 category = $category, \
                 image_url = $image_url, \
                 available = $available",
            )
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("image_url", data.image_url))
            .bind(("available", data.available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item, keeping fields the payload leaves unset
    pub async fn update(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.unwrap_or(existing.description);
        let price = data.price.unwrap_or(existing.price);
        let category = data.category.unwrap_or(existing.category);
        let image_url = data.image_url.or(existing.image_url);
        let available = data.available.unwrap_or(existing.available);

        self.base
            .db()
            .query(
                "UPDATE $rid SET \
                 name = $name, \
                 description = $description, \
                 price = $price, \
                 category = $category, \
                 image_url = $image_url, \
                 available = $available",
            )
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("price", price))
            .bind(("category", category))
            .bind(("image_url", image_url))
            .bind(("available", available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Flip availability without touching the rest of the row
    pub async fn toggle_available(&self, id: i64) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $rid SET available = $available")
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("available", !existing.available))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item. Returns false when it never existed.
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.base
            .db()
            .query("DELETE $rid")
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .await?;
        Ok(true)
    }

    /// Number of menu item rows
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM menu_item GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }
}

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: i64,
}
