// Tesseract OCR with opencv preprocessing

use super::{RecognizeFrame, RecognizeOptions, encode_png};
use crate::frame_classifier::to_gray;
use anyhow::Result;
use opencv::{
    core::{self, Mat, Point, Size},
    imgproc,
    prelude::*,
};
use tesseract::Tesseract;

const DEFAULT_LANG: &str = "eng";

/// General OCR capability backed by the tesseract crate.
pub struct TesseractBackend {
    lang: String,
}

impl TesseractBackend {
    /// Initialize a throwaway engine once so a missing installation or
    /// missing language data is discovered at startup, not per frame.
    pub fn probe() -> Result<Self> {
        Tesseract::new(None, Some(DEFAULT_LANG))?;
        Ok(Self {
            lang: DEFAULT_LANG.to_string(),
        })
    }
}

impl RecognizeFrame for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&mut self, frame: &Mat, options: &RecognizeOptions) -> Result<Option<String>> {
        let processed = preprocess_for_ocr(frame)?;
        let png = encode_png(&processed)?;

        let lang = options.get("lang").map(String::as_str).unwrap_or(&self.lang);

        let mut engine = Tesseract::new(None, Some(lang))?
            .set_image_from_mem(&png)?
            // PSM 6: assume a single uniform block of text
            .set_variable("tessedit_pageseg_mode", "6")?;

        let text = engine.get_text()?;
        let trimmed = text.trim();
        Ok(if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        })
    }
}

/// Denoise and binarize a frame so tesseract sees clean strokes: Gaussian
/// blur, adaptive Gaussian threshold over an 11-pixel neighborhood, then a
/// small closing pass to reconnect broken glyphs.
fn preprocess_for_ocr(frame: &Mat) -> Result<Mat> {
    let gray = to_gray(frame)?;

    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        &gray,
        &mut blurred,
        Size::new(5, 5),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut thresholded = Mat::default();
    imgproc::adaptive_threshold(
        &blurred,
        &mut thresholded,
        255.0,
        imgproc::ADAPTIVE_THRESH_GAUSSIAN_C,
        imgproc::THRESH_BINARY,
        11,
        2.0,
    )?;

    let kernel =
        imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(2, 2), Point::new(-1, -1))?;
    let mut closed = Mat::default();
    imgproc::morphology_ex(
        &thresholded,
        &mut closed,
        imgproc::MORPH_CLOSE,
        &kernel,
        Point::new(-1, -1),
        1,
        core::BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    Ok(closed)
}
