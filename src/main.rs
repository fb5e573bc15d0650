use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use video_receipt::consts::{DEFAULT_MAX_FRAMES, DEFAULT_MIN_CONFIDENCE};
use video_receipt::ocr::RecognizeOptions;
use video_receipt::pipeline::{ExtractorConfig, ReceiptExtractor};

/// Video Receipt - extract structured receipt data from video files
#[derive(Parser, Debug)]
#[command(name = "video_receipt")]
#[command(about = "Extract structured receipt data from a video file", long_about = None)]
struct Args {
    /// Path to the video file
    video: Option<PathBuf>,

    /// Maximum number of candidate frames to process
    #[arg(short = 'f', long, default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: usize,

    /// Confidence threshold reported in the status output (0.0 - 1.0)
    #[arg(short = 'c', long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    min_confidence: f32,

    /// OCR language passed to tesseract
    #[arg(short = 'l', long)]
    lang: Option<String>,

    /// Extra whitespace-separated arguments for the ccextractor binary
    #[arg(long)]
    caption_args: Option<String>,

    /// Print recognition capability status as JSON and exit
    #[arg(short = 's', long)]
    status: bool,

    /// Run with the pipeline disabled (reports a failure result)
    #[arg(long)]
    disabled: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter(None, log::LevelFilter::Info)
        .filter(Some("video_receipt"), log::LevelFilter::Debug)
        .init();

    let args = Args::parse();

    if args.min_confidence < 0.0 || args.min_confidence > 1.0 {
        anyhow::bail!("min-confidence must be between 0.0 and 1.0");
    }

    if args.max_frames == 0 {
        anyhow::bail!("max-frames must be at least 1");
    }

    let config = ExtractorConfig {
        enabled: !args.disabled,
        min_confidence: args.min_confidence,
        max_frames: args.max_frames,
    };
    let mut extractor = ReceiptExtractor::new(config);

    if args.status {
        println!("{}", serde_json::to_string_pretty(&extractor.status())?);
        return Ok(());
    }

    let Some(video) = args.video else {
        anyhow::bail!("A video path is required unless --status is given");
    };

    let mut options = RecognizeOptions::new();
    if let Some(lang) = args.lang {
        options.insert("lang".to_string(), lang);
    }
    if let Some(caption_args) = args.caption_args {
        options.insert("caption_args".to_string(), caption_args);
    }

    let report = extractor.extract(&video, &options);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.success {
        std::process::exit(1);
    }

    info!("Done");
    Ok(())
}
