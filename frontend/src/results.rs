use dioxus::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use imagify_common::styles::OutputStyle;

use crate::errors::UiError;
use crate::escape::{escape_html, unescape_html};
use crate::generate::run_generation;
use crate::notify::{self, Notice, NoticeKind};
use crate::session::{GenerationResult, SessionState, Stage};

/// ダウンロードファイル名。スタイルとエポックミリ秒で一意にする
fn download_file_name(style: &OutputStyle, epoch_ms: i64) -> String {
    format!("ai-generated-{}-{}.txt", style.as_str(), epoch_ms)
}

/// アクション領域。生成トリガー・ローディング・結果をステージで切り替える
#[component]
pub fn GenerateSection(session: SessionState) -> Element {
    let stage = session.stage.read().clone();
    let style = session.style.read().clone();

    let body = match stage {
        Stage::Idle => match style {
            Some(style) => rsx! { GenerateButton { session, style } },
            None => rsx! {},
        },
        Stage::Loading => rsx! { LoadingView {} },
        Stage::Done(result) => rsx! { ResultsView { session, result } },
    };

    rsx! {
        section { class: "generate-section", id: "generate",
            div { class: "container", {body} }
        }
    }
}

#[component]
fn GenerateButton(session: SessionState, style: OutputStyle) -> Element {
    let label = style.display_label();

    rsx! {
        div {
            class: "generate-btn-container",
            style: "text-align: center; padding: 2rem;",
            button {
                class: "btn-primary generate-btn",
                style: "padding: 1rem 3rem; font-size: 1.2rem;",
                onclick: move |_| {
                    spawn_local(run_generation(session, false));
                },
                "Generate {label}"
            }
        }
    }
}

#[component]
fn LoadingView() -> Element {
    rsx! {
        div {
            class: "loading-container fade-in-up",
            style: "text-align: center; padding: 3rem;",
            div {
                class: "loading-spinner",
                style: "width: 72px; height: 72px; border-radius: 50%; border: 8px solid rgba(0, 0, 0, 0.06); border-top-color: var(--primary-color); margin: 0 auto 1rem;",
            }
            h3 { style: "margin: 0.5rem 0 0;", "AI is working its magic..." }
            p { style: "opacity: 0.85; margin-top: 0.5rem;",
                "Analyzing your image and creating amazing content"
            }
        }
    }
}

#[component]
fn ResultsView(session: SessionState, result: GenerationResult) -> Element {
    // 表示前に必ずエスケープ境界を通す
    let safe_story = escape_html(&result.text);
    let title = format!("Your Generated {}", result.style.display_label());
    let content_label = result.style.content_label();

    let on_regenerate = move |_| {
        // 同じ画像のまま、より高いtemperatureで再生成する
        spawn_local(run_generation(session, true));
    };

    let copy_source = safe_story.clone();
    let notice = session.notice;
    let on_copy = move |_| {
        let escaped = copy_source.clone();
        spawn_local(async move {
            copy_to_clipboard(&escaped, notice).await;
        });
    };

    let download_source = safe_story.clone();
    let download_style = result.style.clone();
    let on_download = move |_| {
        download_result(&download_source, &download_style, notice);
    };

    rsx! {
        div { class: "results-section fade-in-up",
            h2 { class: "section-title", "{title}" }
            div {
                class: "result-card",
                style: "display: flex; gap: 1rem; align-items: flex-start; padding: 1rem;",
                img {
                    class: "result-image",
                    src: "{result.image_data}",
                    alt: "Uploaded image",
                    style: "max-width: 420px; border-radius: 12px; object-fit: cover;",
                }
                div { class: "result-content", style: "flex: 1;",
                    h3 { style: "margin-top: 0;", "{content_label}:" }
                    p {
                        class: "generated-text",
                        style: "white-space: pre-line; font-size: 1.05rem; color: var(--text-dark);",
                        dangerous_inner_html: "{safe_story}",
                    }
                    div {
                        class: "result-actions",
                        style: "margin-top: 1.25rem; display: flex; gap: 0.75rem; flex-wrap: wrap; align-items: center;",
                        button {
                            class: "btn-primary btn-generate-new",
                            r#type: "button",
                            onclick: on_regenerate,
                            i { class: "fas fa-sync-alt", style: "margin-right: 8px;" }
                            "Generate New Variation"
                        }
                        button {
                            class: "btn-secondary btn-copy",
                            r#type: "button",
                            onclick: on_copy,
                            i { class: "fas fa-copy", style: "margin-right: 8px;" }
                            "Copy Text"
                        }
                        button {
                            class: "btn-secondary btn-download",
                            r#type: "button",
                            onclick: on_download,
                            i { class: "fas fa-download", style: "margin-right: 8px;" }
                            "Download"
                        }
                    }
                }
            }
        }
    }
}

/// エスケープを逆変換した平文をシステムクリップボードへ書き込む
async fn copy_to_clipboard(escaped: &str, notice: Signal<Option<Notice>>) {
    let plain = unescape_html(escaped);
    let Some(window) = web_sys::window() else {
        return;
    };
    let clipboard = window.navigator().clipboard();
    match JsFuture::from(clipboard.write_text(&plain)).await {
        Ok(_) => notify::notify(notice, "Text copied to clipboard!", NoticeKind::Success),
        Err(e) => {
            web_sys::console::error_1(&e);
            notify::notify(notice, UiError::CopyFailed.to_string(), NoticeKind::Error);
        }
    }
}

/// エスケープを逆変換した平文をBlob化してダウンロードさせる
fn download_result(escaped: &str, style: &OutputStyle, notice: Signal<Option<Notice>>) {
    let plain = unescape_html(escaped);

    let parts = js_sys::Array::of1(&JsValue::from_str(&plain));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain");
    let Ok(blob) = Blob::new_with_str_sequence_and_options(&parts, &options) else {
        notify::notify(notice, "Failed to prepare download", NoticeKind::Error);
        return;
    };
    let Ok(url) = Url::create_object_url_with_blob(&blob) else {
        notify::notify(notice, "Failed to prepare download", NoticeKind::Error);
        return;
    };

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .expect("a要素を作成できません")
        .dyn_into()
        .expect("HtmlAnchorElementではありません");
    anchor.set_href(&url);
    anchor.set_download(&download_file_name(
        style,
        chrono::Utc::now().timestamp_millis(),
    ));
    let _ = anchor.set_attribute("style", "display: none;");

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        anchor.remove();
    }
    let _ = Url::revoke_object_url(&url);

    notify::notify(notice, "Content downloaded!", NoticeKind::Success);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        let style = OutputStyle::from_label("Poetic Description");
        assert_eq!(
            download_file_name(&style, 1_700_000_000_000),
            "ai-generated-poetic-1700000000000.txt"
        );

        let slug = OutputStyle::from_label("Haiku Mode");
        assert_eq!(
            download_file_name(&slug, 1),
            "ai-generated-haiku_mode-1.txt"
        );
    }
}
