//! プロンプト生成モジュール
//!
//! 画像1枚ごとの特徴抽出プロンプトを生成する。
//! スキーマはJSON文字列としてそのまま埋め込む。

/// 特徴抽出プロンプト生成
///
/// # Arguments
/// * `schema_json` - 整形済みのJSON Schema（`extraction_schema_json` の出力）
///
/// # Returns
/// モデルへ送るテキスト部分
pub fn build_extraction_prompt(schema_json: &str) -> String {
    format!(
        r#"You are an expert in fashion and clothes, you feature extract clothes within images. Return JSON output only if it validates against the provided schema. Do not generate schemas, or anything other than a JSON object listing the clothing features. The JSON object must use the schema: {schema_json}"#
    )
}
