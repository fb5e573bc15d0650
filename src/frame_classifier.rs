// Receipt-likeness heuristic for sampled video frames

use crate::consts::{
    INK_INTENSITY_THRESHOLD, MIN_RECEIPT_CONTOUR_AREA, POLY_APPROX_EPSILON,
    TEXT_DENSITY_THRESHOLD,
};
use opencv::{
    core::{self, Mat, Point, Size, Vector},
    imgproc,
    prelude::*,
};

/// Decide whether a decoded frame plausibly shows a receipt.
///
/// Two independent signals, either one accepts: a rectangle-like external
/// contour above a minimum area (the receipt outline), or a high fraction of
/// ink-dark pixels (dense printed text filling the frame). Low precision,
/// high recall by intent.
///
/// Any failure during analysis rejects the frame instead of propagating.
pub fn is_receipt_frame(frame: &Mat) -> bool {
    match analyze_frame(frame) {
        Ok(accepted) => accepted,
        Err(e) => {
            log::debug!("Frame analysis failed, rejecting frame: {}", e);
            false
        }
    }
}

fn analyze_frame(frame: &Mat) -> opencv::Result<bool> {
    let gray = to_gray(frame)?;

    let mut edges = Mat::default();
    imgproc::canny(&gray, &mut edges, 50.0, 150.0, 3, false)?;

    let mut contours: Vector<Vector<Point>> = Vector::new();
    imgproc::find_contours(
        &edges,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut rectangle_like = 0usize;
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        if area <= MIN_RECEIPT_CONTOUR_AREA {
            continue;
        }

        let epsilon = POLY_APPROX_EPSILON * imgproc::arc_length(&contour, true)?;
        let mut approx: Vector<Point> = Vector::new();
        imgproc::approx_poly_dp(&contour, &mut approx, epsilon, true)?;

        if approx.len() == 4 {
            rectangle_like += 1;
        }
    }

    let density = text_density(&gray)?;

    Ok(rectangle_like > 0 || density > TEXT_DENSITY_THRESHOLD)
}

/// Fraction of pixels that are ink-dark after a closing pass.
///
/// The closing operation fills small gaps inside glyphs so broken strokes
/// still count as coverage.
pub fn text_density(gray: &Mat) -> opencv::Result<f64> {
    let kernel =
        imgproc::get_structuring_element(imgproc::MORPH_RECT, Size::new(3, 3), Point::new(-1, -1))?;

    let mut morph = Mat::default();
    imgproc::morphology_ex(
        gray,
        &mut morph,
        imgproc::MORPH_CLOSE,
        &kernel,
        Point::new(-1, -1),
        1,
        core::BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    // THRESH_BINARY_INV at (threshold - 1) marks exactly the pixels with
    // intensity below the ink threshold.
    let mut ink = Mat::default();
    imgproc::threshold(
        &morph,
        &mut ink,
        INK_INTENSITY_THRESHOLD - 1.0,
        255.0,
        imgproc::THRESH_BINARY_INV,
    )?;

    let total = morph.total();
    if total == 0 {
        return Ok(0.0);
    }

    let ink_pixels = core::count_non_zero(&ink)?;
    Ok(ink_pixels as f64 / total as f64)
}

/// Convert a decoded frame to single-channel intensity, whatever channel
/// layout the container handed us.
pub fn to_gray(frame: &Mat) -> opencv::Result<Mat> {
    if frame.channels() == 1 {
        return frame.try_clone();
    }

    let code = if frame.channels() == 4 {
        imgproc::COLOR_BGRA2GRAY
    } else {
        imgproc::COLOR_BGR2GRAY
    };

    let mut gray = Mat::default();
    imgproc::cvt_color(frame, &mut gray, code, 0)?;
    Ok(gray)
}
