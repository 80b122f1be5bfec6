use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// UI上のラベル → サーバーが期待する正規スタイル名の対応表
static CANONICAL_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("poetic description", "poetic"),
        ("poetic", "poetic"),
        ("poetic_description", "poetic"),
        ("creative story", "creative"),
        ("creative", "creative"),
        ("caption", "caption"),
        ("short caption", "caption"),
    ])
});

/// 生成テキストの正規スタイル識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputStyle(String);

impl OutputStyle {
    /// UI上の生ラベルから正規識別子を作る。
    /// 正規化（trim・小文字化・記号除去・空白圧縮）ののち対応表を引き、
    /// 対応表にないラベルはスペースをアンダースコアにしたスラッグをそのまま使う。
    pub fn from_label(raw: &str) -> Self {
        let normalized = normalize_label(raw);
        let canonical = CANONICAL_MAP
            .get(normalized.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| normalized.replace(' ', "_"));
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// "poetic_description" → "Poetic Description" のような表示用ラベル
    pub fn display_label(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 結果セクションの見出しラベル
    pub fn content_label(&self) -> &'static str {
        match self.0.as_str() {
            "caption" => "Caption",
            "poetic" => "Poetic Description",
            _ => "Story",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ラベルの正規化。
/// trim・小文字化のうえ、単語構成文字・空白・ハイフン以外を取り除き、
/// 連続する空白を1つに圧縮する。
fn normalize_label(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_labels() {
        assert_eq!(OutputStyle::from_label("Poetic Description").as_str(), "poetic");
        assert_eq!(OutputStyle::from_label("Creative Story").as_str(), "creative");
        assert_eq!(OutputStyle::from_label("Short Caption").as_str(), "caption");
        assert_eq!(OutputStyle::from_label("poetic_description").as_str(), "poetic");
    }

    // 大文字小文字や余分な空白の揺れは正規化で吸収する
    #[test]
    fn test_normalization_variants() {
        assert_eq!(OutputStyle::from_label("  POETIC   DESCRIPTION  ").as_str(), "poetic");
        assert_eq!(OutputStyle::from_label("Creative\tStory").as_str(), "creative");
        assert_eq!(OutputStyle::from_label("Short Caption!").as_str(), "caption");
    }

    // 対応表にないラベルは決定的にスラッグ化される
    #[test]
    fn test_unknown_labels_are_slugified() {
        assert_eq!(OutputStyle::from_label("Haiku Mode").as_str(), "haiku_mode");
        assert_eq!(
            OutputStyle::from_label("Haiku Mode"),
            OutputStyle::from_label("  haiku   MODE?! ")
        );
    }

    #[test]
    fn test_display_label() {
        assert_eq!(OutputStyle::from_label("Haiku Mode").display_label(), "Haiku Mode");
        assert_eq!(OutputStyle::from_label("poetic").display_label(), "Poetic");
        assert_eq!(
            OutputStyle::from_label("poetic_description").display_label(),
            "Poetic"
        );
    }

    #[test]
    fn test_content_label() {
        assert_eq!(OutputStyle::from_label("caption").content_label(), "Caption");
        assert_eq!(OutputStyle::from_label("poetic").content_label(), "Poetic Description");
        assert_eq!(OutputStyle::from_label("creative").content_label(), "Story");
        assert_eq!(OutputStyle::from_label("Haiku Mode").content_label(), "Story");
    }
}
