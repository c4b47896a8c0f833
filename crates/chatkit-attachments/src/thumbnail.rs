//! Video still-frame extraction.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Capability for deriving a still frame from video bytes.
///
/// Implementations seek to the given offset, rasterize one frame, and
/// return it encoded as JPEG. The orchestrator treats any failure here as
/// non-fatal.
#[async_trait]
pub trait StillFrameExtractor: Send + Sync {
    async fn extract_still_frame(&self, video: &[u8], offset_seconds: f64) -> Result<Vec<u8>>;
}

/// ffmpeg-backed still-frame extractor.
pub struct FfmpegStillFrameExtractor {
    ffmpeg_path: String,
}

impl FfmpegStillFrameExtractor {
    pub fn new(ffmpeg_path: String) -> Result<Self> {
        // Validate ffmpeg_path
        let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
        if ffmpeg_path.chars().any(|c| dangerous_chars.contains(&c)) {
            return Err(anyhow!(
                "Invalid ffmpeg_path: contains dangerous characters"
            ));
        }

        Ok(Self { ffmpeg_path })
    }
}

#[async_trait]
impl StillFrameExtractor for FfmpegStillFrameExtractor {
    async fn extract_still_frame(&self, video: &[u8], offset_seconds: f64) -> Result<Vec<u8>> {
        // Write input to temp file; ffmpeg needs seekable input for -ss
        let input = tempfile::NamedTempFile::new().context("Failed to create temp input file")?;
        tokio::fs::write(input.path(), video)
            .await
            .context("Failed to write video to temp file")?;

        // Output suffix tells ffmpeg to encode JPEG
        let output = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .context("Failed to create temp output file")?;

        let args = vec![
            "-ss".to_string(),
            offset_seconds.to_string(),
            "-i".to_string(),
            input.path().to_string_lossy().to_string(),
            "-vframes".to_string(),
            "1".to_string(),
            "-q:v".to_string(),
            "2".to_string(),
            "-y".to_string(),
            output.path().to_string_lossy().to_string(),
        ];

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to execute ffmpeg")?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(anyhow!("FFmpeg still-frame extraction failed: {}", stderr));
        }

        let frame = tokio::fs::read(output.path())
            .await
            .context("Failed to read extracted frame")?;

        if frame.is_empty() {
            return Err(anyhow!("FFmpeg produced an empty frame"));
        }

        Ok(frame)
    }
}
