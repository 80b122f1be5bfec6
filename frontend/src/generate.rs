use dioxus::prelude::*;
use serde_json::Value;

use imagify_common::generation::{GenerationRequest, interpret};
use imagify_common::styles::OutputStyle;

use crate::chrome;
use crate::errors::UiError;
use crate::notify::{self, NoticeKind};
use crate::server_api;
use crate::session::{GenerationResult, SessionState, Stage};

/// 現在時刻とブラウザの乱数からリクエストを新規作成する
fn fresh_request(style: OutputStyle, is_variation: bool) -> GenerationRequest {
    GenerationRequest::new(
        style,
        is_variation,
        chrono::Utc::now().timestamp_millis(),
        js_sys::Math::random(),
        js_sys::Math::random(),
    )
}

/// 生成フロー本体。
/// 実行中のリクエストはチケットで無効化する: 常に後発が勝ち、
/// 追い越された応答はUIに反映せず破棄する。中断は行わない。
pub async fn run_generation(session: SessionState, is_variation: bool) {
    let mut stage = session.stage;
    let mut ticket = session.ticket;

    // 前提条件: 画像とスタイルが揃うまでネットワークには触れない
    let Some(image) = session.uploaded.peek().clone() else {
        notify::notify(
            session.notice,
            UiError::MissingImage.to_string(),
            NoticeKind::Error,
        );
        return;
    };
    let Some(style) = session.style.peek().clone() else {
        notify::notify(
            session.notice,
            UiError::MissingStyle.to_string(),
            NoticeKind::Error,
        );
        return;
    };

    let request = fresh_request(style.clone(), is_variation);
    let my_ticket = *ticket.peek() + 1;
    ticket.set(my_ticket);

    web_sys::console::log_1(
        &format!(
            "=== 生成リクエスト ===\n\
             request_id: {}\n\
             style: {}\n\
             variation: {}\n\
             temperature: {}",
            request.request_id, request.style, request.is_variation, request.temperature
        )
        .into(),
    );

    stage.set(Stage::Loading);

    let client = server_api::get_client();
    let outcome = client.generate.generate(&request, &image).await;

    // 待っている間に新しいgenerateが走っていたら、この応答は捨てる
    if *ticket.peek() != my_ticket {
        web_sys::console::log_1(
            &format!("追い越された応答を破棄: request_id={}", request.request_id).into(),
        );
        return;
    }

    match outcome {
        Ok(response) => {
            let raw = serde_json::to_value(&response).unwrap_or(Value::Null);
            match interpret(&response, &image.data_url) {
                Ok((text, image_data)) => {
                    stage.set(Stage::Done(GenerationResult {
                        text,
                        image_data,
                        style,
                        raw_response: raw,
                    }));
                    chrome::scroll_to_section("generate");
                }
                Err(message) => {
                    notify::notify(
                        session.notice,
                        UiError::Generation(message).to_string(),
                        NoticeKind::Error,
                    );
                    stage.set(Stage::Idle);
                }
            }
        }
        Err(e) => {
            notify::notify(
                session.notice,
                UiError::from(e).to_string(),
                NoticeKind::Error,
            );
            stage.set(Stage::Idle);
        }
    }
}
