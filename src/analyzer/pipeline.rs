//! バッチ処理
//!
//! 画像1枚ずつ エンコード → API呼び出し → パース → 保存 を順に実行する。
//! 1枚の失敗は記録して次の画像へ進み、バッチ全体は止めない。

use super::cancel::CancelFlag;
use super::client::InferenceClient;
use super::types::{BatchReport, FailedImage, ImageOutcome, ImageStage, SkippedImage};
use crate::encoder::encode_image;
use crate::error::Result;
use crate::scanner::ImageInfo;
use crate::store::OutputStore;
use fashion_extract_common::{
    build_chat_request, build_extraction_prompt, extraction_schema_json,
    parse_extraction_response, ExtractionResult, RequestParams,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub params: RequestParams,
    pub max_image_size: Option<u32>,
    /// 成功のたびに集約ファイルも書き直す
    pub checkpoint: bool,
    pub show_progress: bool,
}

pub struct Pipeline<C> {
    client: C,
    options: PipelineOptions,
    prompt: String,
}

impl<C: InferenceClient> Pipeline<C> {
    pub fn new(client: C, options: PipelineOptions) -> Result<Self> {
        let prompt = build_extraction_prompt(&extraction_schema_json()?);
        Ok(Self {
            client,
            options,
            prompt,
        })
    }

    pub fn into_client(self) -> C {
        self.client
    }

    /// 画像1枚を処理して最終状態を返す（エラーは外に出さない）
    pub async fn process_image(&self, image: &ImageInfo) -> ImageOutcome {
        let mut stage = ImageStage::Encoding;
        match self.run_stages(image, &mut stage).await {
            Ok(Ok(result)) => ImageOutcome::Succeeded(result),
            Ok(Err(reason)) => {
                tracing::warn!(
                    "{} から有効なJSONを抽出できません。スキップします: {}",
                    image.file_name,
                    reason
                );
                ImageOutcome::Skipped { reason }
            }
            Err(error) => ImageOutcome::Failed { stage, error },
        }
    }

    /// 外側のErrは失敗、内側のErrはパースできなかったレスポンス（スキップ）
    async fn run_stages(
        &self,
        image: &ImageInfo,
        stage: &mut ImageStage,
    ) -> Result<std::result::Result<ExtractionResult, fashion_extract_common::Error>> {
        let encoded = encode_image(image, self.options.max_image_size)?;
        let request = build_chat_request(&self.options.params, &self.prompt, &encoded.data_url());

        *stage = ImageStage::RequestSent;
        let response = self.client.complete(&request).await?;
        tracing::debug!("{} の生レスポンス: {}", image.file_name, response);

        *stage = ImageStage::Parsing;
        Ok(parse_extraction_response(&response))
    }

    /// 全画像を順に処理し、最後に集約ファイルを1回書き込む
    pub async fn run(
        &self,
        images: &[ImageInfo],
        store: &OutputStore,
        cancel: &CancelFlag,
    ) -> BatchReport {
        let progress = self.progress_bar(images.len());
        let mut report = BatchReport::default();
        let mut written = HashSet::new();

        for (index, image) in images.iter().enumerate() {
            if cancel.is_cancelled() {
                report.unprocessed = images.len() - index;
                tracing::warn!("中断: 残り{}枚は未処理です", report.unprocessed);
                break;
            }

            progress.set_message(image.file_name.clone());

            match self.process_image(image).await {
                ImageOutcome::Succeeded(result) => {
                    let item_path = store.item_path(&image.file_name);
                    if !written.insert(item_path.clone()) {
                        tracing::warn!(
                            "{} は同名の出力を上書きします: {}",
                            image.file_name,
                            item_path.display()
                        );
                    }

                    match store.write_item(&image.file_name, &result) {
                        Ok(path) => tracing::info!(
                            "✔ {} ({}件) → {}",
                            image.file_name,
                            result.len(),
                            path.display()
                        ),
                        Err(e) => tracing::error!("{} の保存に失敗: {}", image.file_name, e),
                    }

                    report.batch.insert(image.file_name.clone(), result);

                    if self.options.checkpoint {
                        if let Err(e) = store.write_aggregate(&report.batch) {
                            tracing::warn!("集約ファイルのチェックポイントに失敗: {}", e);
                        }
                    }
                }
                ImageOutcome::Skipped { reason } => {
                    report.skipped.push(SkippedImage {
                        file_name: image.file_name.clone(),
                        reason: reason.to_string(),
                    });
                }
                ImageOutcome::Failed { stage, error } => {
                    tracing::error!("{} の処理に失敗 [{}]: {}", image.file_name, stage, error);
                    report.failed.push(FailedImage {
                        file_name: image.file_name.clone(),
                        stage,
                        message: error.to_string(),
                    });
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        match store.write_aggregate(&report.batch) {
            Ok(path) => report.aggregate_path = Some(path),
            Err(e) => report.aggregate_error = Some(e),
        }

        report
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner} 画像を処理中 [{bar:30}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        progress.set_style(style);
        progress
    }
}
