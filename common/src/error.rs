//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSONが見つかりません")]
    NoJsonFound,

    #[error("JSONパースエラー: {0}")]
    Parse(String),

    #[error("スキーマ生成エラー: {0}")]
    Schema(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
