use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollIntoViewOptions,
};

/// 指定セクションへスムーズスクロールする。要素が未描画なら何もしない
pub fn scroll_to_section(id: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(element) = document.get_element_by_id(id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// .reveal要素が画面に入ったらactiveクラスを付ける
pub fn init_reveal_observer() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1("active");
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .expect("IntersectionObserverを作成できません");
    callback.forget();

    if let Ok(elements) = document.query_selector_all(".reveal") {
        for i in 0..elements.length() {
            if let Some(node) = elements.get(i) {
                if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                    observer.observe(&element);
                }
            }
        }
    }
}

/// ナビバー。ハンバーガー開閉と、スクロール位置に応じた背景の切り替えを持つ
#[component]
pub fn Navbar(healthy: Signal<Option<bool>>) -> Element {
    let mut menu_open = use_signal(|| false);
    let mut scrolled = use_signal(|| false);

    // windowのscrollイベントで背景と影を切り替える
    use_effect(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let listener = Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let y = window.scroll_y().unwrap_or(0.0);
            scrolled.set(y > 100.0);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())
            .expect("scrollリスナーの登録に失敗");
        listener.forget();
    });

    let nav_style = if scrolled() {
        "background: rgba(255, 255, 255, 0.98); box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);"
    } else {
        "background: rgba(255, 255, 255, 0.95); box-shadow: none;"
    };

    rsx! {
        nav { class: "navbar", style: "{nav_style}",
            div { class: "nav-container",
                div { class: "nav-logo",
                    i { class: "fas fa-magic" }
                    span { "ImagifyAI" }
                    if let Some(ok) = healthy() {
                        span {
                            class: "health-dot",
                            title: if ok { "Server ready" } else { "Server unavailable" },
                            style: format!(
                                "display: inline-block; width: 8px; height: 8px; border-radius: 50%; margin-left: 8px; background: {};",
                                if ok { "#10b981" } else { "#ef4444" }
                            ),
                        }
                    }
                }
                div { class: if menu_open() { "nav-menu active" } else { "nav-menu" },
                    for (label, target) in [("Home", "home"), ("Create", "upload"), ("Styles", "options"), ("Result", "generate")] {
                        a {
                            class: "nav-link",
                            onclick: move |_| {
                                // リンクを踏んだらメニューは畳む
                                menu_open.set(false);
                                scroll_to_section(target);
                            },
                            "{label}"
                        }
                    }
                }
                div {
                    class: if menu_open() { "hamburger active" } else { "hamburger" },
                    onclick: move |_| menu_open.toggle(),
                    span { class: "bar" }
                    span { class: "bar" }
                    span { class: "bar" }
                }
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            div { class: "container",
                p { "Turn any image into words with ImagifyAI." }
            }
        }
    }
}
