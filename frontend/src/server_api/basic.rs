use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api_underlying::Underlying;

/// /healthのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: bool,
    pub device: String,
}

pub struct BasicApi {
    pub underlying: Arc<Underlying>,
}

impl BasicApi {
    /// サーバーの稼働状態と生成モデルのロード状況を取得
    pub async fn health(&self) -> Result<HealthResponse> {
        Ok(self.underlying.get("health").await?)
    }
}
