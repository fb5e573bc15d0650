// Receipt extraction pipeline: sample, classify, recognize, merge, parse

use crate::confidence;
use crate::consts::{DEFAULT_MAX_FRAMES, DEFAULT_MIN_CONFIDENCE, SUPPORTED_FORMATS};
use crate::frame_classifier;
use crate::ocr::{RecognizeOptions, TextRecognizer};
use crate::receipt_parser::{self, ReceiptData};
use crate::text_merge::{self, TextObservation};
use crate::video_source::VideoSource;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub enabled: bool,
    pub min_confidence: f32,
    pub max_frames: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// Everything that can fail a pipeline run. Recognition-backend and
/// per-field parse failures never surface here; they are recovered inside
/// their own stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Plugin disabled")]
    Disabled,

    #[error("Video file not found: {0}")]
    VideoNotFound(String),

    #[error("Unsupported video format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid video file: {0}")]
    UnreadableVideo(String),

    #[error("No receipt frames found")]
    NoReceiptFrames,

    #[error("Video decoding error: {0}")]
    Decode(#[from] opencv::Error),
}

/// Result of one pipeline run, always returned instead of an error.
#[derive(Debug, Serialize)]
pub struct ExtractionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ReceiptData>,
    pub frames_processed: usize,
    pub texts_extracted: usize,
    pub confidence: f32,
}

impl ExtractionReport {
    fn failure(error: &PipelineError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            receipt: None,
            frames_processed: 0,
            texts_extracted: 0,
            confidence: 0.0,
        }
    }
}

/// Introspection snapshot of the pipeline's capabilities and thresholds
#[derive(Debug, Serialize)]
pub struct PluginStatus {
    pub enabled: bool,
    pub caption_available: bool,
    pub ocr_available: bool,
    pub supported_formats: Vec<String>,
    pub min_confidence: f32,
    pub max_frames: usize,
}

/// Extracts structured receipt data from a video file.
///
/// Holds no shared state; process videos in parallel by giving each its
/// own instance.
pub struct ReceiptExtractor {
    config: ExtractorConfig,
    recognizer: TextRecognizer,
}

impl ReceiptExtractor {
    /// Create an extractor, probing recognition capabilities once.
    pub fn new(config: ExtractorConfig) -> Self {
        let recognizer = TextRecognizer::detect();
        Self { config, recognizer }
    }

    pub fn status(&self) -> PluginStatus {
        PluginStatus {
            enabled: self.config.enabled,
            caption_available: self.recognizer.caption_available(),
            ocr_available: self.recognizer.ocr_available(),
            supported_formats: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
            min_confidence: self.config.min_confidence,
            max_frames: self.config.max_frames,
        }
    }

    /// Run the full pipeline against one video. Never panics or returns an
    /// error; failures come back as a report with `success == false`.
    pub fn extract(&mut self, video_path: &Path, options: &RecognizeOptions) -> ExtractionReport {
        match self.run(video_path, options) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Receipt extraction failed for {}: {}", video_path.display(), e);
                ExtractionReport::failure(&e)
            }
        }
    }

    fn run(
        &mut self,
        video_path: &Path,
        options: &RecognizeOptions,
    ) -> Result<ExtractionReport, PipelineError> {
        if !self.config.enabled {
            return Err(PipelineError::Disabled);
        }

        validate_video_path(video_path)?;

        let mut source = VideoSource::open(video_path)
            .map_err(|e| PipelineError::UnreadableVideo(e.to_string()))?;

        let fps = source.fps();
        let stride = (source.total_frames() / self.config.max_frames as u64).max(1);
        log::info!(
            "Processing {}: {} frames at {:.1} fps, sampling every {} frames",
            video_path.display(),
            source.total_frames(),
            fps,
            stride
        );

        let mut candidates = 0usize;
        let mut observations: Vec<TextObservation> = Vec::new();
        let mut frame_number = 0u64;

        // One decoded frame is resident at a time; each candidate is
        // recognized immediately and its buffer dropped before the next
        // read.
        while let Some(frame) = source.next_frame()? {
            if frame_number % stride == 0 && frame_classifier::is_receipt_frame(&frame) {
                candidates += 1;
                let timestamp = frame_number as f64 / fps;
                log::debug!(
                    "Frame {} at {:.2}s accepted as receipt candidate",
                    frame_number,
                    timestamp
                );

                if let Some(text) = self.recognizer.recognize_frame(&frame, options) {
                    let confidence = confidence::score_text(&text);
                    observations.push(TextObservation {
                        frame_number,
                        timestamp,
                        text,
                        confidence,
                    });
                }

                if candidates >= self.config.max_frames {
                    break;
                }
            }
            frame_number += 1;
        }

        if candidates == 0 {
            return Err(PipelineError::NoReceiptFrames);
        }

        let texts_extracted = observations.len();
        let canonical = text_merge::merge_observations(observations);
        let receipt = receipt_parser::parse_receipt_text(&canonical);
        let confidence = receipt.as_ref().map(|r| r.confidence_score).unwrap_or(0.0);

        log::info!(
            "Extracted text from {} of {} candidate frames, confidence {:.2}",
            texts_extracted,
            candidates,
            confidence
        );

        Ok(ExtractionReport {
            success: true,
            error: None,
            receipt,
            frames_processed: candidates,
            texts_extracted,
            confidence,
        })
    }
}

fn validate_video_path(path: &Path) -> Result<(), PipelineError> {
    if !path.exists() {
        return Err(PipelineError::VideoNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_FORMATS.contains(&extension.as_str()) {
        return Err(PipelineError::UnsupportedFormat(path.display().to_string()));
    }

    Ok(())
}
