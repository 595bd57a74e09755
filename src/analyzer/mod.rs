mod cancel;
mod client;
mod pipeline;
mod types;

pub use cancel::CancelFlag;
pub use client::{parse_completion_body, GroqClient, InferenceClient};
pub use pipeline::{Pipeline, PipelineOptions};
pub use types::{BatchReport, FailedImage, ImageOutcome, ImageStage, SkippedImage};
