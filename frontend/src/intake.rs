use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use dioxus::prelude::*;
use dioxus_web::WebEventExt;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::chrome;
use crate::errors::UiError;
use crate::notify::{self, NoticeKind};
use crate::session::SessionState;

/// 受け付ける画像の上限サイズ（10MiB）
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

const FILE_INPUT_ID: &str = "file-upload-input";

/// 検証済みのアップロード画像。受理のたびに丸ごと置き換える
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime: String,
    pub size: u64,
    pub bytes: Vec<u8>,
    /// プレビューと結果画像のフォールバックに使うdata URL
    pub data_url: String,
}

impl UploadedImage {
    /// 読み込んだバイト列からプレビュー用のdata URLを組み立てる
    pub fn from_bytes(file_name: String, mime: String, bytes: Vec<u8>) -> Self {
        let data_url = format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(&bytes));
        Self {
            size: bytes.len() as u64,
            file_name,
            mime,
            bytes,
            data_url,
        }
    }
}

/// アップロード候補の検証。MIMEタイプとサイズだけを見る。
/// 失敗しても呼び出し側の既存状態には触れない。
pub fn validate_candidate(mime: &str, size: u64) -> Result<(), UiError> {
    if !mime.starts_with("image/") {
        return Err(UiError::NotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UiError::ImageTooLarge);
    }
    Ok(())
}

/// バイト数の表示用フォーマット（例: "1.5 MB"）
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let index = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(index as i32);
    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[index])
}

#[component]
pub fn UploadSection(session: SessionState) -> Element {
    let mut dragging = use_signal(|| false);

    // 検証 → FileReaderで読み込み → セッションの画像を置き換え
    let accept_file = move |js_file: File| {
        let mut uploaded = session.uploaded;
        let notice = session.notice;

        let mime = js_file.type_();
        let size = js_file.size() as u64;
        if let Err(e) = validate_candidate(&mime, size) {
            // 直前に受理した画像とプレビューはそのまま残す
            notify::notify(notice, e.to_string(), NoticeKind::Error);
            return;
        }

        let file_name = js_file.name();
        let reader = Rc::new(FileReader::new().expect("FileReaderを作成できません"));
        let reader_clone = reader.clone();

        let onloadend = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            if let Ok(result) = reader_clone.result() {
                if let Ok(array_buffer) = result.dyn_into::<js_sys::ArrayBuffer>() {
                    let bytes = js_sys::Uint8Array::new(&array_buffer).to_vec();
                    let image =
                        UploadedImage::from_bytes(file_name.clone(), mime.clone(), bytes);
                    web_sys::console::log_1(
                        &format!(
                            "画像を受理: {} ({})",
                            image.file_name,
                            format_file_size(image.size)
                        )
                        .into(),
                    );
                    uploaded.set(Some(image));
                    // スタイル選択セクションが描画されてからスクロールする
                    spawn_local(async move {
                        TimeoutFuture::new(50).await;
                        chrome::scroll_to_section("options");
                    });
                }
            }
        }) as Box<dyn FnMut(_)>);

        reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
        onloadend.forget();
        reader
            .read_as_array_buffer(&js_file)
            .expect("ファイルの読み込みを開始できません");
    };

    let on_input_change = move |_| {
        let window = web_sys::window().expect("グローバルwindowオブジェクトがありません");
        let document = window.document().expect("現在のwindowにdocumentがありません");
        let input = document
            .get_element_by_id(FILE_INPUT_ID)
            .expect("ファイル入力が見つかりません")
            .dyn_into::<HtmlInputElement>()
            .expect("input要素ではありません");
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                accept_file(file);
            }
        }
        // 同じファイルを選び直してもchangeが発火するように値を戻す
        input.set_value("");
    };

    let on_area_click = move |_| {
        let window = web_sys::window().expect("グローバルwindowオブジェクトがありません");
        let document = window.document().expect("現在のwindowにdocumentがありません");
        if let Some(element) = document.get_element_by_id(FILE_INPUT_ID) {
            if let Ok(input) = element.dyn_into::<HtmlInputElement>() {
                input.click();
            }
        }
    };

    // ドラッグ系イベントは常に既定動作を止める
    let on_drag_enter = move |evt: Event<DragData>| {
        evt.prevent_default();
        dragging.set(true);
    };
    let on_drag_over = move |evt: Event<DragData>| {
        evt.prevent_default();
        dragging.set(true);
    };
    let on_drag_leave = move |evt: Event<DragData>| {
        evt.prevent_default();
        dragging.set(false);
    };
    let on_drop = move |evt: Event<DragData>| {
        evt.prevent_default();
        dragging.set(false);
        // ファイルはドロップペイロードのDataTransferから取り出す
        if let Some(raw) = evt.data().try_as_web_event() {
            if let Some(transfer) = raw.data_transfer() {
                if let Some(files) = transfer.files() {
                    if let Some(file) = files.get(0) {
                        web_sys::console::log_1(
                            &format!("ファイルがドロップされました: {}", file.name()).into(),
                        );
                        accept_file(file);
                    }
                }
            }
        }
    };

    let uploaded = session.uploaded.read().clone();
    let (title, subtitle) = if dragging() {
        (
            "Drop your image here".to_string(),
            "Release to upload your image".to_string(),
        )
    } else if let Some(image) = &uploaded {
        (
            "Image uploaded successfully!".to_string(),
            format!(
                "File: {} ({})",
                image.file_name,
                format_file_size(image.size)
            ),
        )
    } else {
        (
            "Upload your image".to_string(),
            "Drag & drop or click to browse".to_string(),
        )
    };
    let icon_class = if uploaded.is_some() {
        "fas fa-check-circle"
    } else {
        "fas fa-cloud-upload-alt"
    };
    let icon_style = if uploaded.is_some() { "color: #10b981;" } else { "" };

    rsx! {
        section { class: "upload-section reveal", id: "upload",
            div { class: "container",
                h2 { class: "section-title", "Create Your Content" }
                div {
                    class: if dragging() { "upload-area dragover" } else { "upload-area" },
                    onclick: on_area_click,
                    ondragenter: on_drag_enter,
                    ondragover: on_drag_over,
                    ondragleave: on_drag_leave,
                    ondrop: on_drop,
                    div { class: "upload-icon",
                        i { class: "{icon_class}", style: "{icon_style}" }
                    }
                    div { class: "upload-text",
                        h3 { "{title}" }
                        p { "{subtitle}" }
                    }
                    if let Some(image) = &uploaded {
                        img {
                            class: "image-preview",
                            src: "{image.data_url}",
                            alt: "Uploaded image preview",
                            style: "max-width: 300px; max-height: 300px; border-radius: 10px; margin-top: 1rem; box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);",
                        }
                    }
                    input {
                        id: FILE_INPUT_ID,
                        class: "file-input",
                        r#type: "file",
                        accept: "image/*",
                        style: "display: none;",
                        onclick: move |evt| evt.stop_propagation(),
                        onchange: on_input_change,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // image/*以外のMIMEタイプは拒否する
    #[test]
    fn test_rejects_non_image_mime() {
        assert_eq!(
            validate_candidate("application/pdf", 1024),
            Err(UiError::NotAnImage)
        );
        assert_eq!(validate_candidate("text/plain", 10), Err(UiError::NotAnImage));
        // "image"で始まっていてもimage/でなければ拒否
        assert_eq!(validate_candidate("imagetext", 10), Err(UiError::NotAnImage));
        assert_eq!(validate_candidate("", 10), Err(UiError::NotAnImage));
    }

    #[test]
    fn test_accepts_image_mime() {
        assert_eq!(validate_candidate("image/png", 1024), Ok(()));
        assert_eq!(validate_candidate("image/jpeg", 1024), Ok(()));
        assert_eq!(validate_candidate("image/gif", 0), Ok(()));
    }

    // 10MiBの境界: ちょうどは受理、1バイト超えたら拒否
    #[test]
    fn test_size_limit_boundary() {
        assert_eq!(validate_candidate("image/png", MAX_IMAGE_BYTES), Ok(()));
        assert_eq!(
            validate_candidate("image/png", MAX_IMAGE_BYTES + 1),
            Err(UiError::ImageTooLarge)
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }

    #[test]
    fn test_data_url_preview() {
        let image = UploadedImage::from_bytes("a.png".into(), "image/png".into(), vec![1, 2, 3]);
        assert!(image.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(image.size, 3);
        log::debug!("data_url: {}", image.data_url);
    }
}
