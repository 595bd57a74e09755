use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 2回目の中断要求で使う終了コード（128 + SIGINT）
const FORCE_EXIT_CODE: i32 = 130;

/// 中断フラグ（画像1枚の処理が終わるごとに確認する）
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Ctrl-Cでフラグを立てるタスクを起動
    ///
    /// 1回目は現在の画像を終えてから停止、2回目は即時終了する。
    /// 書き込み済みの画像ごとのJSONはそのまま残る。
    pub fn cancel_on_ctrl_c(&self) {
        tokio::spawn(self.clone().watch_interrupts(
            || async { tokio::signal::ctrl_c().await.is_ok() },
            || {
                std::process::exit(FORCE_EXIT_CODE);
            },
        ));
    }

    /// `next_signal` がtrueを返すたびに1回の中断要求とみなす
    async fn watch_interrupts<S, Fut, F>(self, mut next_signal: S, force_exit: F)
    where
        S: FnMut() -> Fut,
        Fut: Future<Output = bool>,
        F: FnOnce(),
    {
        if !next_signal().await {
            return;
        }
        tracing::warn!("中断要求を受け付けました。処理中の画像が終わり次第停止します（もう一度で即時終了）");
        self.cancel();

        if next_signal().await {
            tracing::warn!("再度の中断要求のため即時終了します");
            force_exit();
        }
    }
}
