//! Fashion Extract Common Library
//!
//! I/Oを持たない共有ロジック:
//! スキーマ、プロンプト・リクエスト生成、レスポンスの抽出と検証

pub mod error;
pub mod parser;
pub mod prompts;
pub mod request;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use parser::{extract_json_object, parse_extraction_response};
pub use prompts::build_extraction_prompt;
pub use request::{build_chat_request, ChatRequest, ChatResponse, RequestParams};
pub use schema::{extraction_schema, extraction_schema_json};
pub use types::{BatchResult, ClothingItem, ExtractionResult};
