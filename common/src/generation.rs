use serde::{Deserialize, Serialize};

use crate::styles::OutputStyle;

/// 通常生成時のtemperature
pub const BASE_TEMPERATURE: f64 = 0.7;
/// バリエーション再生成時のtemperature。意図的にランダム性を上げる
pub const VARIATION_TEMPERATURE: f64 = 0.95;

pub fn temperature_for(is_variation: bool) -> f64 {
    if is_variation {
        VARIATION_TEMPERATURE
    } else {
        BASE_TEMPERATURE
    }
}

/// 生成エンドポイントへ送る1回分のリクエスト。
/// request_idとvariation_seedはキャッシュ回避と「別の結果が欲しい」という
/// サーバーへの指示のためだけに存在する。
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub style: OutputStyle,
    pub is_variation: bool,
    pub request_id: String,
    pub variation_seed: u64,
    pub temperature: f64,
}

impl GenerationRequest {
    /// 発行時刻（エポックミリ秒）と[0, 1)の乱数2つからリクエストを組み立てる。
    /// 乱数は呼び出し側（ブラウザ側）が供給する。
    pub fn new(
        style: OutputStyle,
        is_variation: bool,
        issued_at_ms: i64,
        id_entropy: f64,
        seed_entropy: f64,
    ) -> Self {
        let request_id = format!("{}-{}", issued_at_ms, (id_entropy * 1_000_000.0).floor() as u32);
        let variation_seed = (seed_entropy * 1_000_000_000.0).floor() as u64;
        Self {
            style,
            is_variation,
            request_id,
            variation_seed,
            temperature: temperature_for(is_variation),
        }
    }
}

/// 生成エンドポイントの応答。
/// サーバーの揺れを許容するため、結果テキストと画像は複数のフィールド名を
/// 受け付け、認識しないフィールドはextraへそのまま保持する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data_camel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GenerateResponse {
    /// story/caption/text/result のうち最初の空でないもの
    pub fn primary_text(&self) -> Option<&str> {
        [&self.story, &self.caption, &self.text, &self.result]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.is_empty())
    }

    /// image_data/image/imageData のうち最初の空でないもの
    pub fn image_source(&self) -> Option<&str> {
        [&self.image_data, &self.image, &self.image_data_camel]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.is_empty())
    }

    /// successフラグが立っているか、結果フィールドのいずれかが
    /// 入っていれば成功扱いとする
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || self.primary_text().is_some()
    }

    /// 失敗時のメッセージ。errorフィールドがなければ既定文
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "Failed to generate content".to_string())
    }
}

/// 応答を解釈して (生成テキスト, 画像ソース) を取り出す。
/// HTTPレベルで成功していても成功シグナルが1つもなければ失敗として扱う。
/// 画像が省略されたときはアップロード時のプレビューへフォールバックする。
pub fn interpret(
    response: &GenerateResponse,
    fallback_image: &str,
) -> Result<(String, String), String> {
    if !response.is_success() {
        return Err(response.failure_message());
    }
    let text = response.primary_text().unwrap_or_default().to_string();
    let image = response
        .image_source()
        .unwrap_or(fallback_image)
        .to_string();
    Ok((text, image))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> OutputStyle {
        OutputStyle::from_label("creative story")
    }

    #[test]
    fn test_temperature_encoding() {
        // 再生成時はより高いランダム性を要求する
        assert_eq!(temperature_for(false), 0.7);
        assert_eq!(temperature_for(true), 0.95);
    }

    #[test]
    fn test_request_construction() {
        let request = GenerationRequest::new(style(), false, 1_700_000_000_000, 0.5, 0.25);
        assert_eq!(request.request_id, "1700000000000-500000");
        assert_eq!(request.variation_seed, 250_000_000);
        assert_eq!(request.temperature, 0.7);
        assert!(!request.is_variation);

        let variation = GenerationRequest::new(style(), true, 1_700_000_000_001, 0.5, 0.25);
        assert_eq!(variation.temperature, 0.95);
        assert!(variation.is_variation);
    }

    // 連続した2回の呼び出しはrequest_idが衝突しない
    #[test]
    fn test_request_ids_are_distinct() {
        let first = GenerationRequest::new(style(), false, 1_700_000_000_000, 0.111, 0.1);
        let second = GenerationRequest::new(style(), true, 1_700_000_000_000, 0.112, 0.2);
        assert_ne!(first.request_id, second.request_id);

        let third = GenerationRequest::new(style(), false, 1_700_000_000_001, 0.111, 0.1);
        assert_ne!(first.request_id, third.request_id);
    }

    #[test]
    fn test_interpret_success_flag_with_story() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"success": true, "story": "Hello <b>world</b>"}"#)
                .expect("応答のパースに失敗");
        let (text, image) = interpret(&response, "data:fallback").expect("成功応答のはず");
        assert_eq!(text, "Hello <b>world</b>");
        // 画像フィールドがなければアップロード時のプレビューを使う
        assert_eq!(image, "data:fallback");
    }

    // successフラグがなくても結果フィールドがあれば成功扱い
    #[test]
    fn test_interpret_without_success_flag() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"caption": "A quiet lake"}"#).expect("応答のパースに失敗");
        let (text, _) = interpret(&response, "data:fallback").expect("成功応答のはず");
        assert_eq!(text, "A quiet lake");
    }

    // story > caption > text > result の優先順位で、空のフィールドは飛ばす
    #[test]
    fn test_text_field_priority() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"story": "", "caption": "from caption", "text": "from text"}"#,
        )
        .expect("応答のパースに失敗");
        assert_eq!(response.primary_text(), Some("from caption"));
    }

    #[test]
    fn test_image_field_aliases() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"story": "s", "imageData": "data:camel"}"#)
                .expect("応答のパースに失敗");
        let (_, image) = interpret(&response, "data:fallback").expect("成功応答のはず");
        assert_eq!(image, "data:camel");

        let response: GenerateResponse =
            serde_json::from_str(r#"{"story": "s", "image": "data:plain"}"#)
                .expect("応答のパースに失敗");
        assert_eq!(response.image_source(), Some("data:plain"));
    }

    // 成功シグナルが1つもない応答はHTTPが通っていても失敗
    #[test]
    fn test_missing_signals_is_failure() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"timestamp": "2026-01-01T00:00:00"}"#)
                .expect("応答のパースに失敗");
        assert_eq!(
            interpret(&response, "data:fallback"),
            Err("Failed to generate content".to_string())
        );
    }

    #[test]
    fn test_error_message_passthrough() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"success": false, "error": "No image uploaded"}"#)
                .expect("応答のパースに失敗");
        assert_eq!(
            interpret(&response, "data:fallback"),
            Err("No image uploaded".to_string())
        );
    }

    // 認識しないフィールドはextraに保持される（不透明なrawペイロード）
    #[test]
    fn test_unrecognized_fields_are_retained() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"success": true, "story": "s", "seed_used": 42}"#)
                .expect("応答のパースに失敗");
        assert_eq!(
            response.extra.get("seed_used"),
            Some(&serde_json::json!(42))
        );
    }
}
