/// HTML挿入前のエスケープ境界。
/// dangerous_inner_htmlへ渡してよいのは、このモジュールを通した文字列だけ。

/// サーバー由来のテキストをHTMLとして安全な形に変換する。
/// 改行は<br>へ置き換えて表示上の行区切りを保つ。
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
        .replace('\n', "<br>")
}

/// escape_htmlの逆変換。コピーとダウンロードで元のプレーンテキストに戻す
pub fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("<br>", "\n")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    // マークアップがリテラル文字列として残ること
    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            escape_html("Hello <b>world</b>"),
            "Hello &lt;b&gt;world&lt;/b&gt;"
        );
    }

    // &を最初に処理しないと後続の実体参照が二重エスケープになる
    #[test]
    fn test_ampersand_is_escaped_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(escape_html("line1\nline2"), "line1<br>line2");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            escape_html(r#"say "hi" & 'bye'"#),
            "say &quot;hi&quot; &amp; &#039;bye&#039;"
        );
    }

    // コピー/ダウンロードは元の文字列を正確に復元する
    #[test]
    fn test_round_trip() {
        let original = "Hello <b>world</b>\n\"quotes\" & 'apostrophes'";
        assert_eq!(unescape_html(&escape_html(original)), original);

        let plain = "no markup at all";
        assert_eq!(unescape_html(&escape_html(plain)), plain);
    }

    #[test]
    fn test_empty() {
        assert_eq!(escape_html(""), "");
        assert_eq!(unescape_html(""), "");
    }
}
