//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::{AppError, AppResult};

/// 创建成功响应
#[derive(Debug, Serialize)]
pub struct MenuCreated {
    pub success: bool,
    pub id: i64,
    pub message: &'static str,
}

/// 更新/删除/切换的确认响应
#[derive(Debug, Serialize)]
pub struct MenuAck {
    pub success: bool,
    pub message: &'static str,
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    Ok(())
}

/// GET /api/menu - 顾客端菜单，只含可售项
pub async fn list_available(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.db.menu_items().find_available().await?;
    Ok(Json(items))
}

/// GET /api/admin/menu - 管理端全量菜单，含已下架项
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.db.menu_items().find_all().await?;
    Ok(Json(items))
}

/// POST /api/admin/menu - 新建菜单项，默认可售
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuCreated>> {
    check_price(payload.price)?;

    let item = state.db.menu_items().create(payload).await?;

    tracing::info!(id = item.id, name = %item.name, "Menu item created");

    Ok(Json(MenuCreated {
        success: true,
        id: item.id,
        message: "Menu item created successfully",
    }))
}

/// PUT /api/admin/menu/:id - 更新菜单项，缺省字段保持原值
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuAck>> {
    if let Some(price) = payload.price {
        check_price(price)?;
    }

    state.db.menu_items().update(id, payload).await?;

    Ok(Json(MenuAck {
        success: true,
        message: "Menu item updated successfully",
    }))
}

/// DELETE /api/admin/menu/:id - 删除菜单项
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuAck>> {
    let deleted = state.db.menu_items().delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }

    Ok(Json(MenuAck {
        success: true,
        message: "Menu item deleted successfully",
    }))
}

/// PATCH /api/admin/menu/:id/toggle - 上下架切换
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuAck>> {
    state.db.menu_items().toggle_available(id).await?;

    Ok(Json(MenuAck {
        success: true,
        message: "Menu item availability toggled",
    }))
}
