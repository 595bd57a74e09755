use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FashionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`fashion-extract config --set-api-key YOUR_KEY` で設定するか GROQ_API_KEY を指定してください")]
    MissingApiKey,

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像読み込みエラー ({file}): {message}")]
    ImageRead { file: String, message: String },

    #[error("API通信エラー: {0}")]
    Transport(String),

    #[error("APIレスポンスが不正: {0}")]
    ApiResponse(String),

    #[error("特徴抽出エラー: {0}")]
    Extraction(#[from] fashion_extract_common::Error),

    #[error("書き込みエラー ({}): {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl FashionError {
    pub fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        FashionError::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FashionError>;
