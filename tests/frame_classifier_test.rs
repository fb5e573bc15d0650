use anyhow::Result;
use opencv::{
    core::{self, Mat, Rect, Scalar},
    imgproc::{self, LINE_8},
};
use video_receipt::consts::TEXT_DENSITY_THRESHOLD;
use video_receipt::frame_classifier::{is_receipt_frame, text_density, to_gray};

fn blank_frame(value: f64) -> Result<Mat> {
    let frame = Mat::new_rows_cols_with_default(
        480,
        640,
        core::CV_8UC3,
        Scalar::new(value, value, value, 0.0),
    )?;
    Ok(frame)
}

#[test]
fn uniform_bright_frame_is_rejected() -> Result<()> {
    // No contours, no ink: neither acceptance path can fire
    let frame = blank_frame(255.0)?;
    assert!(!is_receipt_frame(&frame));
    Ok(())
}

#[test]
fn dense_dark_frame_is_accepted_on_density_alone() -> Result<()> {
    let frame = blank_frame(20.0)?;

    let gray = to_gray(&frame)?;
    let density = text_density(&gray)?;
    assert!(density > TEXT_DENSITY_THRESHOLD);

    assert!(is_receipt_frame(&frame));
    Ok(())
}

#[test]
fn rectangular_outline_is_accepted_despite_low_density() -> Result<()> {
    // A dark receipt-shaped outline on a bright background: well under the
    // density threshold, so acceptance must come from the shape test
    let mut frame = blank_frame(255.0)?;
    imgproc::rectangle(
        &mut frame,
        Rect::new(150, 100, 300, 250),
        Scalar::new(0.0, 0.0, 0.0, 0.0),
        3,
        LINE_8,
        0,
    )?;

    let gray = to_gray(&frame)?;
    let density = text_density(&gray)?;
    assert!(density < TEXT_DENSITY_THRESHOLD);

    assert!(is_receipt_frame(&frame));
    Ok(())
}

#[test]
fn density_tracks_ink_coverage() -> Result<()> {
    // Fill the left half with ink
    let mut frame = blank_frame(255.0)?;
    imgproc::rectangle(
        &mut frame,
        Rect::new(0, 0, 320, 480),
        Scalar::new(0.0, 0.0, 0.0, 0.0),
        imgproc::FILLED,
        LINE_8,
        0,
    )?;

    let gray = to_gray(&frame)?;
    let density = text_density(&gray)?;
    assert!(density > 0.4 && density < 0.6, "density was {}", density);
    Ok(())
}
