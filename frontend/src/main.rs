mod api_underlying;
mod chrome;
mod errors;
mod escape;
mod generate;
mod intake;
mod notify;
mod options;
mod results;
mod server_api;
mod session;

use dioxus::prelude::*;
use dioxus_logger::tracing::Level;
use wasm_bindgen_futures::spawn_local;

fn main() {
    dioxus_logger::init(Level::INFO).expect("ロガーの初期化に失敗しました");
    dioxus_web::launch::launch_cfg(App, dioxus_web::Config::default());
}

#[component]
fn App() -> Element {
    let session = session::use_session();
    let mut server_healthy = use_signal(|| None::<bool>);

    // 起動時に一度だけ、出現アニメーションの監視とヘルスチェックを仕込む
    use_effect(move || {
        chrome::init_reveal_observer();
        spawn_local(async move {
            let client = server_api::get_client();
            match client.basic.health().await {
                Ok(health) => {
                    web_sys::console::log_1(
                        &format!(
                            "=== サーバー稼働状態 ===\n\
                             status: {}\n\
                             models_loaded: {}\n\
                             device: {}",
                            health.status, health.models_loaded, health.device
                        )
                        .into(),
                    );
                    server_healthy.set(Some(health.models_loaded));
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("ヘルスチェックに失敗: {}", e).into());
                    server_healthy.set(Some(false));
                }
            }
        });
    });

    rsx! {
        chrome::Navbar { healthy: server_healthy }
        main {
            section { class: "hero", id: "home",
                div { class: "hero-content reveal",
                    h1 { class: "hero-title", "Transform Images into Stories" }
                    p { class: "hero-subtitle",
                        "Upload an image and let AI craft a poetic description, a creative story, or the perfect caption."
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| chrome::scroll_to_section("upload"),
                        "Get Started"
                    }
                }
            }
            intake::UploadSection { session }
            options::OptionsSection { session }
            results::GenerateSection { session }
        }
        chrome::Footer {}
        notify::NotificationHost { slot: session.notice }
    }
}
