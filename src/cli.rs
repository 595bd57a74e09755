use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fashion-extract")]
#[command(about = "衣類画像からファッション属性をJSONで抽出", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（モデルの生レスポンスを含む）
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像フォルダを処理して画像ごとのJSONと集約ファイルを出力
    Extract {
        /// 画像フォルダのパス
        #[arg(required = true)]
        input: PathBuf,

        /// 出力フォルダ（デフォルト: 入力フォルダ/processed）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// モデルID
        #[arg(short, long)]
        model: Option<String>,

        /// 最大出力トークン数
        #[arg(long)]
        max_tokens: Option<u32>,

        /// サンプリング温度
        #[arg(short, long)]
        temperature: Option<f32>,

        /// APIエンドポイント
        #[arg(long)]
        endpoint: Option<String>,

        /// 429/5xx時の再試行回数
        #[arg(long)]
        max_retries: Option<u32>,

        /// 送信前に長辺をこのピクセル数まで縮小
        #[arg(long)]
        max_image_size: Option<u32>,

        /// 成功のたびに集約ファイルを書き直す
        #[arg(long)]
        checkpoint: bool,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// 埋め込み用のJSON Schemaを表示
    Schema,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
