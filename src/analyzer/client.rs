//! 推論クライアント
//!
//! リクエストを送ってモデルの生テキストを返すだけの境界。
//! 本番はOpenAI互換のchat completions（Groq）、テストではモックを使う。

use crate::config::Config;
use crate::error::{FashionError, Result};
use fashion_extract_common::{ChatRequest, ChatResponse};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// 再試行の待ち時間（試行回数に比例）
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

pub trait InferenceClient {
    /// リクエストを1回送信し、モデルの出力テキストを返す
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;
}

pub struct GroqClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_retries: u32,
}

/// 1回分の送信失敗
struct Attempt {
    error: FashionError,
    retryable: bool,
}

impl GroqClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration, max_retries: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FashionError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            max_retries,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Self::new(
            &config.endpoint,
            &api_key,
            Duration::from_secs(config.timeout_seconds),
            config.max_retries,
        )
    }

    async fn send_once(&self, request: &ChatRequest) -> std::result::Result<String, Attempt> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Attempt {
                retryable: e.is_timeout() || e.is_connect(),
                error: FashionError::Transport(e.to_string()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Attempt {
            retryable: false,
            error: FashionError::Transport(e.to_string()),
        })?;

        if !status.is_success() {
            return Err(Attempt {
                retryable: is_retryable_status(status),
                error: FashionError::Transport(format!("status {}: {}", status, preview(&body))),
            });
        }

        parse_completion_body(&body).map_err(|error| Attempt {
            error,
            retryable: false,
        })
    }
}

impl InferenceClient for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let mut retries = 0;
        loop {
            match self.send_once(request).await {
                Ok(text) => return Ok(text),
                Err(attempt) if attempt.retryable && retries < self.max_retries => {
                    retries += 1;
                    let delay = RETRY_BASE_DELAY * retries;
                    tracing::warn!(
                        "{}: {}秒後に再試行します ({}/{})",
                        attempt.error,
                        delay.as_secs(),
                        retries,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(attempt) => return Err(attempt.error),
            }
        }
    }
}

/// レート制限とサーバー側エラーのみ再試行対象
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// chat completionsのレスポンス本文から出力テキストを取り出す
pub fn parse_completion_body(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| FashionError::ApiResponse(format!("{}: {}", e, preview(body))))?;

    response
        .into_text()
        .ok_or_else(|| FashionError::ApiResponse("choices[0].message.content がありません".into()))
}

fn preview(body: &str) -> String {
    body.chars().take(300).collect()
}
