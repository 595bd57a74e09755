//! 抽出結果の型定義
//!
//! - ClothingItem: 画像内の衣類1点分の属性
//! - ExtractionResult: 1枚の画像から抽出された衣類の一覧
//! - BatchResult: 画像ファイル名 → ExtractionResult の集約

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 衣類1点分の属性（全フィールド必須）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClothingItem {
    pub clothing_category: String,
    pub color: String,
    pub style: String,
    pub suitable_for_weather: String,
    pub description: String,
}

/// 1枚の画像に対する抽出結果
///
/// 衣類が検出されなかった場合は `clothes` が空になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    pub clothes: Vec<ClothingItem>,
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.clothes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clothes.is_empty()
    }
}

/// 実行全体の集約結果（画像ファイル名 → 抽出結果）
///
/// 成功した画像のみを含む。入力はファイル名順に処理されるため、
/// BTreeMapの順序が処理順と一致する。
pub type BatchResult = BTreeMap<String, ExtractionResult>;
