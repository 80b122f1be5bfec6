use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 統一されたAPIエラー型
#[derive(Debug, Clone, Deserialize, Serialize, Error)]
pub enum ApiError {
    /// 接続レベルの失敗
    #[error("Network error: {0}")]
    Network(String),
    /// 応答の本文がJSONとして解釈できない。本文をそのまま保持する
    #[error("Server returned non-JSON response: {0}")]
    Parse(String),
    /// サーバーが明示したエラー
    #[error("Server error: {0}")]
    Server(String),
}
