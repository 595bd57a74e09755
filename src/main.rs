use clap::Parser;
use fashion_extract::analyzer::{CancelFlag, GroqClient, Pipeline, PipelineOptions};
use fashion_extract::{cli, config, error, logging, scanner, store};
use cli::{Cli, Commands};
use config::Config;
use error::{FashionError, Result};
use fashion_extract_common::extraction_schema_json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            model,
            max_tokens,
            temperature,
            endpoint,
            max_retries,
            max_image_size,
            checkpoint,
            no_progress,
        } => {
            // CLI指定を設定ファイルより優先
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(max_tokens) = max_tokens {
                config.max_tokens = max_tokens;
            }
            if let Some(temperature) = temperature {
                config.temperature = temperature;
            }
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            if let Some(max_retries) = max_retries {
                config.max_retries = max_retries;
            }
            if max_image_size.is_some() {
                config.max_image_size = max_image_size;
            }
            config.validate()?;

            // 1. 画像スキャン
            tracing::info!("[1/3] 画像をスキャン中: {}", input.display());
            let images = scanner::scan_folder(&input)?;
            if images.is_empty() {
                return Err(FashionError::NoImagesFound(input.display().to_string()));
            }
            tracing::info!("✔ {}枚の画像を検出", images.len());

            let client = GroqClient::from_config(&config)?;
            let output_dir = output.unwrap_or_else(|| input.join("processed"));
            let store = store::OutputStore::new(output_dir);
            store.ensure_dir()?;

            // 2. 特徴抽出
            tracing::info!("[2/3] 特徴抽出中 (モデル: {})", config.model);
            let pipeline = Pipeline::new(
                client,
                PipelineOptions {
                    params: config.request_params(),
                    max_image_size: config.max_image_size,
                    checkpoint,
                    show_progress: !no_progress,
                },
            )?;

            let cancel = CancelFlag::new();
            cancel.cancel_on_ctrl_c();
            let report = pipeline.run(&images, &store, &cancel).await;

            // 3. 結果
            tracing::info!(
                "[3/3] 成功: {}枚 / スキップ: {}枚 / 失敗: {}枚{}",
                report.succeeded(),
                report.skipped.len(),
                report.failed.len(),
                if report.cancelled() {
                    format!(" / 未処理: {}枚", report.unprocessed)
                } else {
                    String::new()
                }
            );
            tracing::info!("出力先: {}", store.output_dir().display());

            if let Some(path) = &report.aggregate_path {
                tracing::info!("✔ 集約ファイル: {}", path.display());
            }
            if let Some(e) = report.aggregate_error {
                tracing::warn!("集約ファイルがないため成功{}件分の集約結果は失われます", report.batch.len());
                return Err(e);
            }
        }

        Commands::Schema => {
            println!("{}", extraction_schema_json()?);
        }

        Commands::Config { set_api_key, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  モデル: {}", config.model);
                println!("  最大トークン: {}", config.max_tokens);
                println!("  温度: {}", config.temperature);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  再試行回数: {}", config.max_retries);
                match config.max_image_size {
                    Some(size) => println!("  最大画像サイズ: {}px", size),
                    None => println!("  最大画像サイズ: 縮小なし"),
                }
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
