use dioxus::prelude::*;
use imagify_common::styles::OutputStyle;
use serde_json::Value;

use crate::intake::UploadedImage;
use crate::notify::Notice;

/// 結果ビューへ渡す生成結果
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub text: String,
    pub image_data: String,
    pub style: OutputStyle,
    /// サーバー応答そのもの。デバッグ用に保持するだけで表示には使わない
    pub raw_response: Value,
}

/// アクション領域の表示状態。
/// Loadingへの遷移は純粋なUI切り替えで、進行中のリクエストを中断しない
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    Loading,
    Done(GenerationResult),
}

/// アプリ全体で共有するセッション状態。
/// ルートコンポーネントが所有し、各コンポーネントへ値渡しする（Signalはハンドル）。
#[derive(Clone, Copy, PartialEq)]
pub struct SessionState {
    /// 受理済みの画像。新しい画像を受理するたびに丸ごと置き換える
    pub uploaded: Signal<Option<UploadedImage>>,
    /// 選択中の正規スタイル
    pub style: Signal<Option<OutputStyle>>,
    pub stage: Signal<Stage>,
    /// 表示中の通知。常に最大1件
    pub notice: Signal<Option<Notice>>,
    /// 実行中リクエストの追い越し判定に使う単調増加チケット
    pub ticket: Signal<u64>,
}

pub fn use_session() -> SessionState {
    SessionState {
        uploaded: use_signal(|| None),
        style: use_signal(|| None),
        stage: use_signal(|| Stage::Idle),
        notice: use_signal(|| None),
        ticket: use_signal(|| 0),
    }
}
