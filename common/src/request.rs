//! 推論リクエストの組み立て
//!
//! OpenAI互換のchat completions形式。テキスト部と画像部を
//! 1つのuserメッセージにまとめる。副作用なし。

use serde::{Deserialize, Serialize};

/// 呼び出しパラメータ（モデルとサンプリング設定）
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
    pub stop: Option<Vec<String>>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// 構造化出力ヒント（`{"type": "json_object"}`）
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { kind: "json_object".to_string() }
    }
}

/// chat completionsのレスポンス（必要な部分のみ）
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// 最初の候補のテキストを取り出す
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

/// 画像1枚分のリクエストを組み立てる
///
/// # Arguments
/// * `params` - モデル・最大トークン・温度
/// * `prompt` - `build_extraction_prompt` で生成した指示文
/// * `image_data_url` - `data:image/jpeg;base64,...` 形式のData URL
pub fn build_chat_request(params: &RequestParams, prompt: &str, image_data_url: &str) -> ChatRequest {
    ChatRequest {
        model: params.model.clone(),
        messages: vec![Message {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text { text: prompt.to_string() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_data_url.to_string() },
                },
            ],
        }],
        temperature: params.temperature,
        max_tokens: params.max_tokens,
        stream: false,
        stop: None,
        response_format: ResponseFormat::json_object(),
    }
}
