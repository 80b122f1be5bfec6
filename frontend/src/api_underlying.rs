use std::sync::Arc;

use imagify_common::api::ApiError;
use reqwest;

/// HTTP APIリクエストの基盤となる構造体
pub struct Underlying {
    base_url: String,
    client: reqwest::Client,
}

impl Underlying {
    /// 新しいUnderlyingインスタンスを作成
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// 新しいUnderlying共有インスタンスを作成
    pub fn new_shared(base_url: String) -> Arc<Self> {
        Arc::new(Self::new(base_url))
    }

    /// GETリクエストを送信してJSONレスポンスをデシリアライズ
    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|_| ApiError::Parse(body))
    }

    /// multipart POSTを送信してJSONレスポンスをデシリアライズ。
    /// 本文はまず文字列で受け、JSONとして読めなければ本文ごとParseエラーにする。
    /// キャッシュさせないため、no-cacheヘッダーと呼び出し側のクエリを常に付ける。
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .query(query)
            .header("Cache-Control", "no-cache")
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|_| ApiError::Parse(body))
    }
}
