use crate::error::FashionError;
use fashion_extract_common::{BatchResult, ExtractionResult};
use std::fmt;
use std::path::PathBuf;

/// 画像1枚の処理段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStage {
    Encoding,
    RequestSent,
    Parsing,
}

impl fmt::Display for ImageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStage::Encoding => write!(f, "encoding"),
            ImageStage::RequestSent => write!(f, "request"),
            ImageStage::Parsing => write!(f, "parsing"),
        }
    }
}

/// 画像1枚の最終状態
#[derive(Debug)]
pub enum ImageOutcome {
    Succeeded(ExtractionResult),
    /// レスポンスから有効なJSONが得られなかった
    Skipped { reason: fashion_extract_common::Error },
    Failed { stage: ImageStage, error: FashionError },
}

#[derive(Debug, Clone)]
pub struct SkippedImage {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct FailedImage {
    pub file_name: String,
    pub stage: ImageStage,
    pub message: String,
}

/// 実行結果のまとめ
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 成功した画像のみ
    pub batch: BatchResult,
    pub skipped: Vec<SkippedImage>,
    pub failed: Vec<FailedImage>,
    /// 中断で処理されなかった画像数
    pub unprocessed: usize,
    /// 集約ファイルの書き込みに失敗した場合はNone
    pub aggregate_path: Option<PathBuf>,
    pub aggregate_error: Option<FashionError>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.batch.len()
    }

    pub fn cancelled(&self) -> bool {
        self.unprocessed > 0
    }
}
