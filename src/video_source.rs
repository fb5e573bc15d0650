// Pull-based frame access over an opencv VideoCapture

use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};
use std::path::Path;

/// Wraps an opened video container and exposes the three things the
/// pipeline needs: total frame count, frame rate, and a pull-based
/// next-frame operation.
pub struct VideoSource {
    capture: VideoCapture,
    total_frames: u64,
    fps: f64,
}

impl VideoSource {
    /// Open a video file. Returns an error when the container cannot be
    /// opened by any available backend.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let path_str = path.to_string_lossy();
        let capture = VideoCapture::from_file(&path_str, videoio::CAP_ANY)?;

        if !capture.is_opened()? {
            anyhow::bail!("could not open video container: {}", path.display());
        }

        let total_frames = capture.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64;
        let mut fps = capture.get(videoio::CAP_PROP_FPS)?;
        if fps <= 0.0 {
            log::warn!(
                "Container reports no frame rate for {}, assuming 30 fps",
                path.display()
            );
            fps = 30.0;
        }

        Ok(Self {
            capture,
            total_frames,
            fps,
        })
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Decode the next frame, or `None` at end of stream.
    pub fn next_frame(&mut self) -> opencv::Result<Option<Mat>> {
        let mut frame = Mat::default();
        if self.capture.read(&mut frame)? && !frame.empty() {
            Ok(Some(frame))
        } else {
            Ok(None)
        }
    }
}
