use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 実行時に上書きできる設定ストア
static CONFIG_STORE: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

/// 設定値を取得する。
/// 優先順位: CONFIG_STORE（実行時の上書き） → 環境変数。
/// WASM環境では環境変数は常に未設定となり、呼び出し側のデフォルトに落ちる。
pub fn get(name: &str) -> Result<String> {
    if let Some(value) = get_from_store(name) {
        if value.is_empty() {
            return Err(anyhow!("{} is empty", name));
        }
        return Ok(value);
    }

    if let Ok(val) = std::env::var(name)
        && !val.is_empty()
    {
        return Ok(val);
    }

    Err(anyhow!("Configuration key not found: {}", name))
}

/// 設定値を実行時に上書きする
pub fn set(name: &str, value: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.insert(name.to_string(), value.to_string());
    }
}

fn get_from_store(name: &str) -> Option<String> {
    if let Ok(store) = CONFIG_STORE.lock() {
        store.get(name).cloned()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_store_value_is_returned() {
        set("IMAGIFY_TEST_SERVER", "http://localhost:9999");
        assert_eq!(
            get("IMAGIFY_TEST_SERVER").expect("ストアの値が取得できるはず"),
            "http://localhost:9999"
        );
    }

    #[test]
    #[serial]
    fn test_missing_key_is_error() {
        assert!(get("IMAGIFY_TEST_MISSING_KEY").is_err());
    }

    #[test]
    #[serial]
    fn test_empty_value_is_error() {
        // 空文字列は未設定と同じ扱いにする
        set("IMAGIFY_TEST_EMPTY", "");
        assert!(get("IMAGIFY_TEST_EMPTY").is_err());
    }

    #[test]
    #[serial]
    fn test_store_overrides_previous_value() {
        set("IMAGIFY_TEST_OVERRIDE", "first");
        set("IMAGIFY_TEST_OVERRIDE", "second");
        assert_eq!(
            get("IMAGIFY_TEST_OVERRIDE").expect("上書き後の値が取得できるはず"),
            "second"
        );
    }
}
