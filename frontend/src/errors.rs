/// エラーメッセージの統一管理
use std::fmt::Display;

use imagify_common::api::ApiError;

/// アップロードと生成フロー関連のエラー種別
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    // 入力検証関連
    NotAnImage,
    ImageTooLarge,

    // 前提条件関連
    MissingImage,
    MissingStyle,

    // 生成関連
    Generation(String),

    // クリップボード関連
    CopyFailed,
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            UiError::NotAnImage => "Please upload an image file (JPEG, PNG, GIF, etc.)",
            UiError::ImageTooLarge => "Image size should be less than 10MB",
            UiError::MissingImage => "Please upload an image first",
            UiError::MissingStyle => "Please select an output type",
            UiError::Generation(detail) => {
                return write!(f, "Error generating content: {}", detail);
            }
            UiError::CopyFailed => "Failed to copy text",
        };
        write!(f, "{}", message)
    }
}

/// エラーから文字列への簡易変換
impl From<UiError> for String {
    fn from(error: UiError) -> Self {
        error.to_string()
    }
}

impl From<ApiError> for UiError {
    fn from(error: ApiError) -> Self {
        UiError::Generation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 通知にそのまま載せる文言の確認
    #[test]
    fn test_messages() {
        assert_eq!(UiError::MissingImage.to_string(), "Please upload an image first");
        assert_eq!(UiError::MissingStyle.to_string(), "Please select an output type");
        assert_eq!(
            UiError::Generation("boom".into()).to_string(),
            "Error generating content: boom"
        );
    }

    #[test]
    fn test_api_error_wraps_detail() {
        let error: UiError = ApiError::Network("connection refused".into()).into();
        assert_eq!(
            error.to_string(),
            "Error generating content: Network error: connection refused"
        );
    }
}
