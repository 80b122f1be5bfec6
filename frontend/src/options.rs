use dioxus::prelude::*;
use imagify_common::styles::OutputStyle;

use crate::chrome;
use crate::session::SessionState;

/// スタイル選択カードの定義: (表示ラベル, value属性, アイコン, 説明)
const STYLE_CARDS: [(&str, &str, &str, &str); 3] = [
    (
        "Poetic Description",
        "poetic description",
        "fa-feather-alt",
        "Lyrical, evocative language that captures the mood of your image",
    ),
    (
        "Creative Story",
        "creative story",
        "fa-book-open",
        "A short imaginative narrative inspired by your image",
    ),
    (
        "Short Caption",
        "short caption",
        "fa-quote-right",
        "A concise, shareable caption ready for social media",
    ),
];

#[component]
pub fn OptionsSection(session: SessionState) -> Element {
    // 画像が受理されるまでは出さない
    let visible = session.uploaded.read().is_some();

    rsx! {
        if visible {
            section { class: "options-section reveal", id: "options",
                div { class: "container",
                    h2 { class: "section-title", "Choose Your Style" }
                    div { class: "options-grid",
                        for (label, value, icon, description) in STYLE_CARDS {
                            OptionCard { session, label, value, icon, description }
                        }
                    }
                }
            }
        }
    }
}

/// スタイル選択カード。アクティブになるのは常に1枚だけ
#[component]
fn OptionCard(
    session: SessionState,
    label: &'static str,
    value: &'static str,
    icon: &'static str,
    description: &'static str,
) -> Element {
    let mut style = session.style;
    let canonical = OutputStyle::from_label(value);
    let active = style.read().as_ref() == Some(&canonical);

    rsx! {
        div {
            class: if active { "option-card active" } else { "option-card" },
            "data-value": value,
            onclick: move |_| {
                let chosen = OutputStyle::from_label(value);
                web_sys::console::log_1(
                    &format!("スタイル選択: {} -> {}", value, chosen).into(),
                );
                style.set(Some(chosen));
                // スタイルが決まったら生成トリガーを見せる
                chrome::scroll_to_section("generate");
            },
            div { class: "option-icon",
                i { class: "fas {icon}" }
            }
            h3 { "{label}" }
            p { "{description}" }
        }
    }
}
