//! 通用工具模块 - 错误处理、日志和 ID 生成

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as a resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER so the
/// web clients can treat IDs as plain numbers):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at the order
///     volume of a single restaurant)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    const JS_MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991; // 2^53 - 1

    #[test]
    fn snowflake_fits_js_safe_integer() {
        for _ in 0..1000 {
            let id = snowflake_id();
            assert!(id > 0);
            assert!(id <= JS_MAX_SAFE_INTEGER);
        }
    }

    #[test]
    fn snowflake_orders_by_time_across_millis() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(3));
        let b = snowflake_id();
        // The timestamp occupies the high bits, so a later millisecond
        // always produces a larger ID whatever the random tail is.
        assert!(b > a);
    }
}
