//! 订单金额校验
//!
//! 请求体里的价格是 `f64`，直接相加会累积二进制浮点误差，
//! 所以这里一律换算成 `Decimal` 再算：单行金额四舍五入到分，
//! 订单总额按行汇总，与客户端声明值在容差内比对。

use rust_decimal::prelude::*;

use crate::orders::OrderItemInput;
use crate::utils::AppError;

/// 金额保留两位小数
const DECIMAL_PLACES: u32 = 2;

/// 比对容差 0.01，恰好一分钱
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// 单价上限 Rp 100,000,000
const MAX_PRICE: f64 = 100_000_000.0;
/// 单行数量上限
const MAX_QUANTITY: i32 = 999;

#[inline]
fn require_finite(value: f64, field: &str) -> Result<(), AppError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{field} is not a finite number: {value}"
        )))
    }
}

/// f64 → Decimal，非法输入归零
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Decimal → f64，四舍五入到分后再转换
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// 单个行项目的边界检查
pub fn validate_item(item: &OrderItemInput) -> Result<(), AppError> {
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(AppError::validation(format!(
            "price cannot be negative: {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price {} is over the {} limit",
            item.price, MAX_PRICE
        )));
    }

    if item.quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity {} is over the {} limit",
            item.quantity, MAX_QUANTITY
        )));
    }

    Ok(())
}

/// 各行金额（单价 × 数量，先按行舍入到分）之和
pub fn order_total(items: &[OrderItemInput]) -> Decimal {
    items
        .iter()
        .map(|i| {
            (to_decimal(i.price) * Decimal::from(i.quantity))
                .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        })
        .sum()
}

/// 整单校验：逐行检查，再用重算的总额核对客户端声明值
pub fn validate_order(items: &[OrderItemInput], claimed_total: f64) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    for item in items {
        validate_item(item)?;
    }

    require_finite(claimed_total, "totalAmount")?;

    let computed = order_total(items);
    let claimed = to_decimal(claimed_total);
    if (computed - claimed).abs() > MONEY_TOLERANCE {
        return Err(AppError::validation(format!(
            "Total amount mismatch: items sum to {}, request claims {}",
            to_f64(computed),
            claimed_total
        )));
    }

    Ok(())
}
