//! 桌台二维码令牌服务
//!
//! 处理桌台令牌的签发、解码和版本匹配。
//!
//! 令牌是 URL 安全的 Base64 字符串，内容为 JSON Claims，可直接嵌入
//! 二维码 URL。令牌不做签名：它只标识桌台和二维码版本，换发后旧版本
//! 的令牌在服务端版本比对时立即失效。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::now_millis;

/// 存储在令牌中的桌台 Claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableToken {
    /// 桌台记录 ID
    pub table_id: i64,
    /// 签发时的二维码版本
    pub version: u32,
    /// 签发时间戳（毫秒）
    pub issued_at: i64,
}

impl TableToken {
    /// 版本匹配检查
    ///
    /// 解码成功只说明令牌结构有效且未过期；令牌是否仍然可用，
    /// 取决于签发版本与桌台当前版本是否一致。
    pub fn matches_version(&self, live_version: u32) -> bool {
        self.version == live_version
    }
}

/// 令牌错误
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("令牌格式错误: {0}")]
    Malformed(String),

    #[error("令牌已过期")]
    Expired,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),
}

/// 默认令牌有效期（小时）
const DEFAULT_TTL_HOURS: i64 = 24;

/// 桌台令牌编解码器
#[derive(Debug, Clone)]
pub struct TokenCodec {
    ttl: Duration,
}

impl TokenCodec {
    /// 使用默认 24 小时有效期创建
    pub fn new() -> Self {
        Self::with_ttl_hours(DEFAULT_TTL_HOURS)
    }

    /// 使用指定有效期（小时）创建
    pub fn with_ttl_hours(hours: i64) -> Self {
        Self {
            ttl: Duration::hours(hours),
        }
    }

    /// 为桌台签发新令牌
    pub fn issue(&self, table_id: i64, version: u32) -> Result<String, TokenError> {
        self.issue_at(table_id, version, now_millis())
    }

    fn issue_at(&self, table_id: i64, version: u32, now_ms: i64) -> Result<String, TokenError> {
        let claims = TableToken {
            table_id,
            version,
            issued_at: now_ms,
        };
        let json =
            serde_json::to_vec(&claims).map_err(|e| TokenError::GenerationFailed(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// 解码并校验令牌结构与时效
    pub fn decode(&self, token: &str) -> Result<TableToken, TokenError> {
        self.decode_at(token, now_millis())
    }

    fn decode_at(&self, token: &str, now_ms: i64) -> Result<TableToken, TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let claims: TableToken =
            serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if now_ms - claims.issued_at > self.ttl.num_milliseconds() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let codec = TokenCodec::new();

        let token = codec.issue(7, 3).expect("Failed to issue token");
        let claims = codec.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.table_id, 7);
        assert_eq!(claims.version, 3);
        assert!(claims.issued_at > 0);
    }

    #[test]
    fn test_token_uses_url_safe_alphabet() {
        let codec = TokenCodec::new();
        let token = codec.issue(42, 1).expect("Failed to issue token");

        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_tokens_issued_at_different_times_differ() {
        let codec = TokenCodec::new();

        let earlier = codec
            .issue_at(5, 1, 1_000)
            .expect("Failed to issue first token");
        let later = codec
            .issue_at(5, 1, 2_000)
            .expect("Failed to issue second token");

        assert_ne!(earlier, later);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = TokenCodec::new();
        let ttl_ms = Duration::hours(24).num_milliseconds();

        let token = codec.issue_at(3, 1, 0).expect("Failed to issue token");

        // Exactly at the TTL boundary the token is still accepted
        let claims = codec.decode_at(&token, ttl_ms).expect("Token at boundary");
        assert_eq!(claims.table_id, 3);

        // One millisecond past the TTL it is not
        let err = codec.decode_at(&token, ttl_ms + 1).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let codec = TokenCodec::new();

        for bad in ["", "%%%not-base64%%%", "with spaces inside"] {
            let err = codec.decode(bad).unwrap_err();
            assert!(matches!(err, TokenError::Malformed(_)), "input: {bad:?}");
        }

        // Valid Base64 wrapping something that is not token JSON
        let not_json = URL_SAFE_NO_PAD.encode(b"hello warung");
        let err = codec.decode(&not_json).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn test_version_match() {
        let claims = TableToken {
            table_id: 1,
            version: 2,
            issued_at: now_millis(),
        };

        assert!(claims.matches_version(2));
        assert!(!claims.matches_version(1));
        assert!(!claims.matches_version(3));
    }
}
