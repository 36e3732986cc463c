//! 桌台仓储
//!
//! 桌号（客人视角）与记录键（存储视角）分离：查找按桌号，
//! 写入按记录键。二维码的版本号与令牌也落在桌台行上。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate};
use crate::utils::snowflake_id;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

/// 桌台字段投影，记录键展平为数字 id
const PROJECTION: &str =
    "record::id(id) AS id, table_number, capacity, location, status, qr_version, qr_token";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 按记录键取桌台
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM dining_table WHERE id = $rid"
            ))
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// 按客人视角的桌号取桌台
    pub async fn find_by_number(&self, table_number: i64) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM dining_table WHERE table_number = $table_number LIMIT 1"
            ))
            .bind(("table_number", table_number))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// 新建桌台，桌号在店内必须唯一
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if self.find_by_number(data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                data.table_number
            )));
        }

        let id = snowflake_id();
        self.base
            .db()
            .query(
                "CREATE ONLY $rid SET \
                 table_number = $table_number, \
                 capacity = $capacity, \
                 location = $location, \
                 status = 'available', \
                 qr_version = 0, \
                 qr_token = NONE",
            )
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("table_number", data.table_number))
            .bind(("capacity", data.capacity.unwrap_or(4)))
            .bind(("location", data.location.unwrap_or_default()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Dining table insert returned no row".to_string()))
    }

    /// 写入新签发的二维码令牌和版本号
    pub async fn set_qr(&self, id: i64, version: u32, token: &str) -> RepoResult<DiningTable> {
        self.base
            .db()
            .query("UPDATE $rid SET qr_version = $version, qr_token = $token")
            .bind(("rid", RecordId::from_table_key(TABLE, id)))
            .bind(("version", version))
            .bind(("token", token.to_string()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// 桌台总数
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM dining_table GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }
}

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: i64,
}
