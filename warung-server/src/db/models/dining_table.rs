//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
///
/// Rows are read through an explicit projection that flattens the record
/// key into `id`, so the struct carries plain numbers end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    /// Record key (snowflake)
    pub id: i64,
    /// Guest-facing table number, unique within the restaurant
    pub table_number: i64,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub location: String,
    /// 桌台状态标签，目前只有 "available"
    #[serde(default = "default_status")]
    pub status: String,
    /// QR code generation counter; 0 means no code was ever issued
    #[serde(default)]
    pub qr_version: u32,
    /// Token embedded in the currently printed QR code
    #[serde(default)]
    pub qr_token: Option<String>,
}

fn default_capacity() -> i32 {
    4
}

fn default_status() -> String {
    "available".to_string()
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i64,
    pub capacity: Option<i32>,
    pub location: Option<String>,
}
