use crate::error::{FashionError, Result};
use fashion_extract_common::RequestParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
    /// 429/5xx時の再試行回数（0で再試行なし）
    pub max_retries: u32,
    /// 送信前に長辺をこのピクセル数まで縮小する
    pub max_image_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.groq.com/openai/v1/chat/completions".into(),
            model: "llama-3.2-11b-vision-preview".into(),
            max_tokens: 1024,
            temperature: 1.0,
            timeout_seconds: 120,
            max_retries: 0,
            max_image_size: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FashionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fashion-extract").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FashionError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 設定値の範囲チェック
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(FashionError::Config("モデルが指定されていません".into()));
        }
        if self.max_tokens == 0 {
            return Err(FashionError::Config("max_tokens は1以上を指定してください".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(FashionError::Config(format!(
                "temperature は0.0〜2.0で指定してください: {}",
                self.temperature
            )));
        }
        if self.max_image_size == Some(0) {
            return Err(FashionError::Config("max_image_size は1以上を指定してください".into()));
        }
        Ok(())
    }

    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
