//! エラーケーステスト
//!
//! 入力フォルダ・エラー表示・変換を検証

use fashion_extract::error::FashionError;
use fashion_extract::scanner;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, FashionError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す（呼び出し側でNoImagesFoundにする）
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("labels.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// FashionErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FashionError::Config("テスト設定エラー".to_string()),
        FashionError::FolderNotFound("/path/to/folder".to_string()),
        FashionError::NoImagesFound("フォルダ".to_string()),
        FashionError::ImageRead {
            file: "broken.jpg".to_string(),
            message: "decode failed".to_string(),
        },
        FashionError::Transport("status 429".to_string()),
        FashionError::ApiResponse("empty".to_string()),
        FashionError::Write {
            path: PathBuf::from("/out/a.json"),
            message: "disk full".to_string(),
        },
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 画像名とパスがメッセージに含まれる
#[test]
fn test_error_display_includes_context() {
    let err = FashionError::ImageRead {
        file: "broken.jpg".to_string(),
        message: "decode failed".to_string(),
    };
    assert!(format!("{}", err).contains("broken.jpg"));

    let err = FashionError::write("/out/a.json", "disk full");
    let display = format!("{}", err);
    assert!(display.contains("/out/a.json"));
    assert!(display.contains("disk full"));
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = FashionError::MissingApiKey;
    let display = format!("{}", err);

    assert!(display.contains("APIキー"));
    assert!(display.contains("fashion-extract config"));
    assert!(display.contains("GROQ_API_KEY"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FashionError = io_err.into();

    assert!(matches!(err, FashionError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FashionError = json_err.into();

    assert!(matches!(err, FashionError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = fashion_extract_common::Error::NoJsonFound;
    let err: FashionError = common_err.into();

    assert!(matches!(err, FashionError::Extraction(_)));
    assert!(format!("{}", err).contains("JSONが見つかりません"));
}
