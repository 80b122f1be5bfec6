use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

/// 通知の自動消滅までの時間（ミリ秒）
const DISMISS_AFTER_MS: u32 = 5_000;
/// 退場トランジションの長さ（ミリ秒）
const EXIT_TRANSITION_MS: u32 = 300;

/// 通知の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    /// 未知の種別名はinfo扱い
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => NoticeKind::Success,
            "error" => NoticeKind::Error,
            "warning" => NoticeKind::Warning,
            _ => NoticeKind::Info,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        }
    }

    /// Font Awesomeのアイコン名
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "check-circle",
            NoticeKind::Error => "exclamation-circle",
            NoticeKind::Warning => "exclamation-triangle",
            NoticeKind::Info => "info-circle",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            NoticeKind::Success => "#10b981",
            NoticeKind::Error => "#ef4444",
            NoticeKind::Warning => "#f59e0b",
            NoticeKind::Info => "#3b82f6",
        }
    }
}

/// 表示中の通知1件
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    /// 古いタイマーが後続の通知を消さないための連番
    seq: u64,
    pub leaving: bool,
}

static NOTICE_SEQ: AtomicU64 = AtomicU64::new(0);

/// 表示中の通知を置き換える。表示は常に最大1件。
/// 5秒後に退場トランジションを挟んで自動で消える。
pub fn notify(mut slot: Signal<Option<Notice>>, message: impl Into<String>, kind: NoticeKind) {
    let seq = NOTICE_SEQ.fetch_add(1, Ordering::Relaxed) + 1;
    slot.set(Some(Notice {
        message: message.into(),
        kind,
        seq,
        leaving: false,
    }));

    spawn_local(async move {
        TimeoutFuture::new(DISMISS_AFTER_MS).await;
        // 新しい通知に置き換わっていたら何もしない
        if slot.peek().as_ref().map(|n| n.seq) != Some(seq) {
            return;
        }
        if let Some(notice) = slot.write().as_mut() {
            notice.leaving = true;
        }
        TimeoutFuture::new(EXIT_TRANSITION_MS).await;
        if slot.peek().as_ref().map(|n| n.seq) == Some(seq) {
            slot.set(None);
        }
    });
}

#[component]
pub fn NotificationHost(slot: Signal<Option<Notice>>) -> Element {
    let Some(notice) = slot() else {
        return rsx! {};
    };

    let kind_name = notice.kind.name();
    let icon = notice.kind.icon();
    let color = notice.kind.color();
    let animation = if notice.leaving {
        "fadeInUp 0.3s ease"
    } else {
        "fadeInDown 0.3s ease"
    };

    rsx! {
        div {
            class: "notification notification-{kind_name}",
            style: format!(
                "position: fixed; top: 100px; right: 20px; background: {}; color: white; \
                 padding: 1rem 1.5rem; border-radius: 10px; \
                 box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2); z-index: 10000; \
                 max-width: 400px; animation: {};",
                color, animation
            ),
            div {
                class: "notification-content",
                style: "display: flex; align-items: center; gap: 0.6rem;",
                i { class: "fas fa-{icon}" }
                span { "{notice.message}" }
            }
        }
    }
}
