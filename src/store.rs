//! 出力ストア
//!
//! - 画像ごとのJSON: `<output_dir>/<画像名の拡張子なし>.json`
//! - 集約ファイル: `<output_dir>/all_features`（実行終了時に1回書き込み、中身はJSON）
//!
//! 集約ファイルは拡張子を持たないため、画像ごとの `<stem>.json` と衝突しない。

use crate::error::{FashionError, Result};
use fashion_extract_common::{BatchResult, ExtractionResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};

pub const AGGREGATE_FILE_NAME: &str = "all_features";

#[derive(Debug, Clone)]
pub struct OutputStore {
    output_dir: PathBuf,
}

impl OutputStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 出力フォルダを作成（既存なら何もしない）
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| FashionError::write(&self.output_dir, e))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 画像ファイル名から出力パスを決める
    pub fn item_path(&self, file_name: &str) -> PathBuf {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());
        self.output_dir.join(format!("{}.json", stem))
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.output_dir.join(AGGREGATE_FILE_NAME)
    }

    /// 画像1枚分の結果を書き込み
    pub fn write_item(&self, file_name: &str, result: &ExtractionResult) -> Result<PathBuf> {
        let path = self.item_path(file_name);
        write_json(&path, result)?;
        Ok(path)
    }

    /// 集約結果を書き込み
    pub fn write_aggregate(&self, batch: &BatchResult) -> Result<PathBuf> {
        let path = self.aggregate_path();
        write_json(&path, batch)?;
        Ok(path)
    }
}

/// インデント4の整形JSONで一時ファイルに書き、リネームで置き換える
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| FashionError::write(path, e))?;
    bytes.push(b'\n');

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, &bytes).map_err(|e| FashionError::write(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        FashionError::write(path, e)
    })
}
