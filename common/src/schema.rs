//! 抽出スキーマ
//!
//! ExtractionResultの型定義からJSON Schemaを生成する。
//! プロンプトへの埋め込みに使い、検証は型付きデシリアライズで行う。

use crate::error::{Error, Result};
use crate::types::ExtractionResult;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// ExtractionResultのJSON Schema
pub fn extraction_schema() -> RootSchema {
    schema_for!(ExtractionResult)
}

/// プロンプト埋め込み用に整形したJSON Schema
pub fn extraction_schema_json() -> Result<String> {
    serde_json::to_string_pretty(&extraction_schema())
        .map_err(|e| Error::Schema(e.to_string()))
}
