//! Table QR Module
//!
//! 桌台二维码的签发、换发与解码。
//!
//! 每张桌台有一个整数 `qr_version`，令牌内嵌签发时的版本号。
//! 换发会把版本号 +1，旧令牌因版本不匹配立即全部失效，
//! 不需要服务端令牌黑名单。

use crate::db::repository::DiningTableRepository;
use crate::token::TokenCodec;
use crate::utils::{AppError, AppResult};

/// 桌台当前二维码
#[derive(Debug, Clone)]
pub struct TableQr {
    pub table_number: i64,
    /// 令牌字符串，前端据此渲染二维码图片
    pub token: String,
    pub version: u32,
    /// 顾客扫码后打开的完整下单地址
    pub url: String,
    /// 本次调用之前是否已有有效二维码
    pub existed: bool,
}

/// 顾客扫码解析出的桌台信息
#[derive(Debug, Clone)]
pub struct ResolvedTable {
    pub table_number: i64,
    pub capacity: i32,
    pub location: String,
}

/// 桌台二维码服务
#[derive(Clone)]
pub struct TableService {
    tables: DiningTableRepository,
    codec: TokenCodec,
    public_base_url: String,
}

impl TableService {
    pub fn new(tables: DiningTableRepository, codec: TokenCodec, public_base_url: String) -> Self {
        Self {
            tables,
            codec,
            public_base_url,
        }
    }

    /// 查询桌台当前二维码，没有则懒签发第一版
    ///
    /// 幂等：已有二维码时重复调用返回同一令牌，不换发。
    pub async fn get_or_issue(&self, table_number: i64) -> AppResult<TableQr> {
        let table = self
            .tables
            .find_by_number(table_number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_number} not found")))?;

        if let Some(token) = table.qr_token {
            return Ok(TableQr {
                table_number,
                url: self.qr_url(&token),
                token,
                version: table.qr_version,
                existed: true,
            });
        }

        // 首次签发从版本 1 开始
        let version = table.qr_version.max(1);
        let token = self.codec.issue(table.id, version)?;
        self.tables.set_qr(table.id, version, &token).await?;

        tracing::info!(table_number, version, "Issued table QR");

        Ok(TableQr {
            table_number,
            url: self.qr_url(&token),
            token,
            version,
            existed: false,
        })
    }

    /// 换发桌台二维码，此前签发的所有令牌立即失效
    pub async fn regenerate(&self, table_number: i64) -> AppResult<TableQr> {
        let table = self
            .tables
            .find_by_number(table_number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_number} not found")))?;

        let version = table.qr_version + 1;
        let token = self.codec.issue(table.id, version)?;
        self.tables.set_qr(table.id, version, &token).await?;

        tracing::info!(table_number, version, "Regenerated table QR");

        Ok(TableQr {
            table_number,
            url: self.qr_url(&token),
            token,
            version,
            existed: false,
        })
    }

    /// 解码顾客扫到的令牌并核对桌台当前版本
    ///
    /// 结构损坏、过期、桌台不存在、版本不匹配一律返回同一个
    /// 无效令牌错误，不区分原因。
    pub async fn resolve(&self, token: &str) -> AppResult<ResolvedTable> {
        let claims = self.codec.decode(token).map_err(|e| {
            tracing::debug!("Token rejected: {e}");
            AppError::invalid_token()
        })?;

        let table = self
            .tables
            .find_by_id(claims.table_id)
            .await?
            .ok_or_else(AppError::invalid_token)?;

        if !claims.matches_version(table.qr_version) {
            tracing::debug!(
                table_number = table.table_number,
                token_version = claims.version,
                live_version = table.qr_version,
                "Token version superseded"
            );
            return Err(AppError::invalid_token());
        }

        Ok(ResolvedTable {
            table_number: table.table_number,
            capacity: table.capacity,
            location: table.location,
        })
    }

    fn qr_url(&self, token: &str) -> String {
        format!("{}/order?token={}", self.public_base_url, token)
    }
}
