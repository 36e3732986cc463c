//! Table QR API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

/// 员工控制台的二维码查询响应
///
/// `qr_code` 就是令牌字符串，由前端渲染成二维码图片。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQrResponse {
    pub table_number: i64,
    pub qr_code: String,
    pub qr_version: u32,
    pub qr_url: String,
    #[serde(rename = "hasExistingQR")]
    pub has_existing_qr: bool,
}

/// 换发响应，换发后不存在"已有二维码"一说
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    pub table_number: i64,
    pub qr_code: String,
    pub qr_version: u32,
    pub qr_url: String,
}

/// 顾客扫码解析响应
#[derive(Debug, Serialize)]
pub struct DecodedTableResponse {
    pub table_number: i64,
    pub capacity: i32,
    pub location: String,
}

/// GET /api/table/:table_number - 桌台当前二维码，首次访问时懒签发
pub async fn get_qr(
    State(state): State<ServerState>,
    Path(table_number): Path<i64>,
) -> AppResult<Json<TableQrResponse>> {
    let qr = state.tables.get_or_issue(table_number).await?;
    Ok(Json(TableQrResponse {
        table_number: qr.table_number,
        qr_code: qr.token,
        qr_version: qr.version,
        qr_url: qr.url,
        has_existing_qr: qr.existed,
    }))
}

/// POST /api/table/:table_number/regenerate - 换发二维码，旧令牌全部失效
pub async fn regenerate(
    State(state): State<ServerState>,
    Path(table_number): Path<i64>,
) -> AppResult<Json<RegenerateResponse>> {
    let qr = state.tables.regenerate(table_number).await?;
    Ok(Json(RegenerateResponse {
        table_number: qr.table_number,
        qr_code: qr.token,
        qr_version: qr.version,
        qr_url: qr.url,
    }))
}

/// GET /api/table/decode/:token - 顾客扫码解析桌台信息
pub async fn decode(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<DecodedTableResponse>> {
    let table = state.tables.resolve(&token).await?;
    Ok(Json(DecodedTableResponse {
        table_number: table.table_number,
        capacity: table.capacity,
        location: table.location,
    }))
}
