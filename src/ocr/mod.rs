// Text recognition backends and the priority fallback dispatcher

use anyhow::Result;
use opencv::{
    core::{Mat, Vector},
    imgcodecs,
    prelude::VectorToVec,
};
use std::collections::HashMap;

pub mod caption_backend;
pub mod region_fallback;
pub mod tesseract_backend;

/// Free-form options passed through to the recognition backends.
///
/// Recognized keys: `lang` (tesseract language), `caption_args` (extra
/// whitespace-separated arguments for the ccextractor binary).
pub type RecognizeOptions = HashMap<String, String>;

/// Trait for backends that can turn a decoded frame into text
pub trait RecognizeFrame {
    fn name(&self) -> &'static str;

    /// Extract text from one frame. `Ok(None)` means the backend ran but
    /// found nothing usable.
    fn recognize(&mut self, frame: &Mat, options: &RecognizeOptions) -> Result<Option<String>>;
}

/// Wrapper enum for the backend implementations
/// This allows using backends polymorphically without dyn trait issues
pub enum RecognizerBackend {
    Caption(caption_backend::CaptionBackend),
    Tesseract(tesseract_backend::TesseractBackend),
    Regions(region_fallback::RegionFallback),
}

impl RecognizeFrame for RecognizerBackend {
    fn name(&self) -> &'static str {
        match self {
            RecognizerBackend::Caption(backend) => backend.name(),
            RecognizerBackend::Tesseract(backend) => backend.name(),
            RecognizerBackend::Regions(backend) => backend.name(),
        }
    }

    fn recognize(&mut self, frame: &Mat, options: &RecognizeOptions) -> Result<Option<String>> {
        match self {
            RecognizerBackend::Caption(backend) => backend.recognize(frame, options),
            RecognizerBackend::Tesseract(backend) => backend.recognize(frame, options),
            RecognizerBackend::Regions(backend) => backend.recognize(frame, options),
        }
    }
}

/// Priority-ordered registry of the recognition capabilities present in
/// this environment, resolved once at startup.
pub struct TextRecognizer {
    backends: Vec<RecognizerBackend>,
}

impl TextRecognizer {
    /// Probe the environment and register whatever is available:
    /// caption extraction first, then tesseract, then the pixel-only
    /// fallback which is always present.
    pub fn detect() -> Self {
        let mut backends = Vec::new();

        match caption_backend::CaptionBackend::detect() {
            Some(backend) => {
                log::info!("Caption extraction available: {}", backend.binary_path().display());
                backends.push(RecognizerBackend::Caption(backend));
            }
            None => log::warn!("ccextractor binary not found, caption extraction disabled"),
        }

        match tesseract_backend::TesseractBackend::probe() {
            Ok(backend) => backends.push(RecognizerBackend::Tesseract(backend)),
            Err(e) => log::warn!("Tesseract OCR unavailable: {}", e),
        }

        backends.push(RecognizerBackend::Regions(region_fallback::RegionFallback));

        Self { backends }
    }

    pub fn caption_available(&self) -> bool {
        self.backends
            .iter()
            .any(|b| matches!(b, RecognizerBackend::Caption(_)))
    }

    pub fn ocr_available(&self) -> bool {
        self.backends
            .iter()
            .any(|b| matches!(b, RecognizerBackend::Tesseract(_)))
    }

    /// Walk the fallback chain and return the first non-empty text.
    ///
    /// A backend error is logged and treated as "no text from this level";
    /// it never aborts the frame or the pipeline.
    pub fn recognize_frame(&mut self, frame: &Mat, options: &RecognizeOptions) -> Option<String> {
        for backend in &mut self.backends {
            match backend.recognize(frame, options) {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    log::debug!("{} recognized {} characters", backend.name(), text.len());
                    return Some(text);
                }
                Ok(_) => {
                    log::debug!("{} found no text, trying next backend", backend.name());
                }
                Err(e) => {
                    log::warn!("{} failed, trying next backend: {}", backend.name(), e);
                }
            }
        }
        None
    }
}

/// PNG-encode a frame for backends that want an image file or byte blob.
pub(crate) fn encode_png(frame: &Mat) -> Result<Vec<u8>> {
    let mut buffer: Vector<u8> = Vector::new();
    imgcodecs::imencode(".png", frame, &mut buffer, &Vector::new())?;
    Ok(buffer.to_vec())
}
