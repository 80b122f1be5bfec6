use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use imagify_common::api::ApiError;
use imagify_common::generation::{GenerateResponse, GenerationRequest};

use crate::api_underlying::Underlying;
use crate::intake::UploadedImage;

pub struct GenerateApi {
    pub underlying: Arc<Underlying>,
}

impl GenerateApi {
    /// 画像と生成パラメータをmultipartで送信する。
    /// クエリのtsとrid、no-cacheヘッダーでキャッシュを無効化する。
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        image: &UploadedImage,
    ) -> Result<GenerateResponse, ApiError> {
        let image_part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let form = Form::new()
            .part("image", image_part)
            .text("style", request.style.as_str().to_string())
            .text(
                "variation",
                if request.is_variation { "true" } else { "false" },
            )
            .text("request_id", request.request_id.clone())
            .text("variation_seed", request.variation_seed.to_string())
            .text("temperature", request.temperature.to_string());

        let query = [
            ("ts", chrono::Utc::now().timestamp_millis().to_string()),
            ("rid", request.request_id.clone()),
        ];

        self.underlying.post_multipart("generate", &query, form).await
    }
}
