// Caption extraction via the external ccextractor binary

use super::{RecognizeFrame, RecognizeOptions, encode_png};
use anyhow::{Context, Result};
use opencv::core::Mat;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Specialized caption-extraction capability, backed by a system-installed
/// `ccextractor` executable. Frames are handed over as temporary PNG files
/// and the recognized text is read from stdout.
pub struct CaptionBackend {
    binary: PathBuf,
}

impl CaptionBackend {
    /// Look up the binary on PATH. Absence is not an error, the capability
    /// is simply not registered.
    pub fn detect() -> Option<Self> {
        which::which("ccextractor")
            .ok()
            .map(|binary| Self { binary })
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary
    }
}

impl RecognizeFrame for CaptionBackend {
    fn name(&self) -> &'static str {
        "ccextractor"
    }

    fn recognize(&mut self, frame: &Mat, options: &RecognizeOptions) -> Result<Option<String>> {
        let png = encode_png(frame)?;

        let tmp = tempfile::Builder::new()
            .prefix("receipt-frame-")
            .suffix(".png")
            .tempfile()
            .context("creating frame handoff file")?;
        std::fs::write(tmp.path(), &png).context("writing frame handoff file")?;

        let mut command = Command::new(&self.binary);
        command.arg(tmp.path()).arg("-out=txt").arg("-stdout");

        if let Some(extra) = options.get("caption_args") {
            command.args(extra.split_whitespace());
        }

        let output = command.output().context("running ccextractor")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ccextractor exited with {}: {}", output.status, stderr.trim());
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
