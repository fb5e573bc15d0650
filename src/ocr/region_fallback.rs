// Pixel-only fallback: count text-like regions, recognize nothing

use super::{RecognizeFrame, RecognizeOptions};
use crate::consts::MIN_TEXT_REGION_AREA;
use crate::frame_classifier::to_gray;
use anyhow::Result;
use opencv::{
    core::{Mat, Point, Vector},
    imgproc,
};

/// Last-resort backend used when no real recognition capability exists.
/// It cannot read text; it binarizes the frame with Otsu's method, counts
/// contours large enough to be text regions, and reports that count so the
/// pipeline still produces something measurable.
pub struct RegionFallback;

impl RecognizeFrame for RegionFallback {
    fn name(&self) -> &'static str {
        "region-count"
    }

    fn recognize(&mut self, frame: &Mat, _options: &RecognizeOptions) -> Result<Option<String>> {
        let gray = to_gray(frame)?;

        let mut binary = Mat::default();
        imgproc::threshold(
            &gray,
            &mut binary,
            0.0,
            255.0,
            imgproc::THRESH_BINARY + imgproc::THRESH_OTSU,
        )?;

        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours(
            &binary,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )?;

        let mut regions = 0usize;
        for contour in contours.iter() {
            if imgproc::contour_area(&contour, false)? > MIN_TEXT_REGION_AREA {
                regions += 1;
            }
        }

        Ok(Some(format!("Text detected in {} regions", regions)))
    }
}
