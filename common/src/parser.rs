//! APIレスポンスパーサー
//!
//! モデル出力（前後に説明文やコードブロックが付くことがある）から
//! 最初のJSONオブジェクトを抽出し、ExtractionResultとして検証する。

use crate::error::{Error, Result};
use crate::types::ExtractionResult;

/// テキストから最初のトップレベルJSONオブジェクトを抽出
///
/// 最初の `{` から深さを数えて対応する `}` までを返す。
/// 文字列リテラル内の括弧とエスケープは無視する。
/// 後続に別のオブジェクトがあっても最初の1つだけを返す。
///
/// # Returns
/// * `Some(&str)` - 抽出されたJSON文字列
/// * `None` - `{` がない、または閉じられていない場合
///
/// # Examples
/// ```
/// use fashion_extract_common::extract_json_object;
///
/// let response = "Sure: {\"clothes\": []} Thanks!";
/// assert_eq!(extract_json_object(response), Some("{\"clothes\": []}"));
/// ```
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in response[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&response[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// 抽出レスポンスをパース
///
/// # Returns
/// * `Ok(ExtractionResult)` - パース・検証成功
/// * `Err(Error::NoJsonFound)` - JSONオブジェクトがない
/// * `Err(Error::Parse)` - JSONが不正、またはスキーマに合わない
pub fn parse_extraction_response(response: &str) -> Result<ExtractionResult> {
    let json_str = extract_json_object(response).ok_or(Error::NoJsonFound)?;
    serde_json::from_str(json_str).map_err(|e| Error::Parse(e.to_string()))
}
