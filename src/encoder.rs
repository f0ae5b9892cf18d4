use log::{debug, error, info};
use serde_json::{from_str, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::{EncoderConfig, OutputConfig};
use crate::errors::EncoderError;

// @module: External encoder invocations (ffmpeg render/concat, ffprobe)

/// One per-segment render request
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Background image path
    pub background: PathBuf,

    /// Voice audio path for this segment
    pub voice: PathBuf,

    /// Segment text burned into the clip
    pub text: String,

    /// Clip duration in seconds, from the probed voice duration
    pub duration_secs: f64,

    /// Output clip path
    pub output: PathBuf,
}

/// Wrapper around the ffmpeg/ffprobe command line tools
pub struct Encoder {
    /// Encoder binary paths, timeout, and verbosity
    config: EncoderConfig,

    /// Output geometry and text style for rendered clips
    output: OutputConfig,
}

impl Encoder {
    /// Create a new encoder from configuration
    pub fn new(config: EncoderConfig, output: OutputConfig) -> Self {
        Encoder { config, output }
    }

    /// Measure the duration of an audio file in seconds via ffprobe
    pub async fn probe_duration<P: AsRef<Path>>(&self, audio_path: P) -> Result<f64, EncoderError> {
        let audio_path = audio_path.as_ref();
        let args = Self::build_probe_args(audio_path);

        let output = self.run_tool("ffprobe", &self.config.ffprobe_path, &args).await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: Value = from_str(&stdout)
            .map_err(|e| EncoderError::ProbeParse(format!("invalid ffprobe JSON: {}", e)))?;

        let duration = json
            .get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| {
                EncoderError::ProbeParse(format!("no duration in ffprobe output for {:?}", audio_path))
            })?;

        if duration <= 0.0 {
            return Err(EncoderError::ProbeParse(format!(
                "non-positive duration {} for {:?}",
                duration, audio_path
            )));
        }

        debug!("Probed duration {:.3}s for {:?}", duration, audio_path);

        Ok(duration)
    }

    /// Render a single clip: looped image + burned-in text + voice audio
    pub async fn render_clip(&self, job: &RenderJob) -> Result<(), EncoderError> {
        let args = self.build_render_args(job);

        self.run_tool("ffmpeg", &self.config.ffmpeg_path, &args).await?;

        if !clip_is_usable(&job.output) {
            return Err(EncoderError::MissingOutput(format!("{:?}", job.output)));
        }

        info!("Video part created: {:?}", job.output);

        Ok(())
    }

    /// Concatenate rendered clips into the final video
    pub async fn concat<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        manifest_path: P1,
        output_path: P2,
    ) -> Result<(), EncoderError> {
        let manifest_path = manifest_path.as_ref();
        let output_path = output_path.as_ref();
        let args = self.build_concat_args(manifest_path, output_path);

        self.run_tool("ffmpeg", &self.config.ffmpeg_path, &args).await?;

        if !clip_is_usable(output_path) {
            return Err(EncoderError::MissingOutput(format!("{:?}", output_path)));
        }

        info!("Video concatenated: {:?}", output_path);

        Ok(())
    }

    /// ffprobe argument list for a duration probe
    pub fn build_probe_args(audio_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "json".to_string(),
            audio_path.to_string_lossy().to_string(),
        ]
    }

    /// ffmpeg argument list for a per-segment render
    pub fn build_render_args(&self, job: &RenderJob) -> Vec<String> {
        vec![
            "-loglevel".to_string(),
            self.loglevel().to_string(),
            "-loop".to_string(),
            "1".to_string(),
            "-i".to_string(),
            job.background.to_string_lossy().to_string(),
            "-i".to_string(),
            job.voice.to_string_lossy().to_string(),
            "-vf".to_string(),
            self.build_drawtext_filter(&job.text),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-t".to_string(),
            format!("{}", job.duration_secs),
            "-y".to_string(),
            job.output.to_string_lossy().to_string(),
        ]
    }

    /// ffmpeg argument list for the concat pass
    pub fn build_concat_args(&self, manifest_path: &Path, output_path: &Path) -> Vec<String> {
        vec![
            "-loglevel".to_string(),
            self.loglevel().to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            manifest_path.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-strict".to_string(),
            "experimental".to_string(),
            "-shortest".to_string(),
            "-y".to_string(),
            output_path.to_string_lossy().to_string(),
        ]
    }

    /// Centered drawtext filter string for a segment
    pub fn build_drawtext_filter(&self, text: &str) -> String {
        format!(
            "drawtext=text='{}':fontfile={}:fontsize={}:fontcolor={}:x=(w-text_w)/2:y=(h-text_h)/2",
            escape_drawtext(text),
            self.output.font_file,
            self.output.font_size,
            self.output.font_color
        )
    }

    /// ffmpeg -loglevel value based on the hide_output flag
    fn loglevel(&self) -> &'static str {
        if self.config.hide_output { "panic" } else { "info" }
    }

    /// Run one encoder tool with the configured timeout, checking its exit status
    async fn run_tool(
        &self,
        tool: &str,
        binary: &str,
        args: &[String],
    ) -> Result<std::process::Output, EncoderError> {
        debug!("{} {}", binary, args.join(" "));

        // kill_on_drop so a timed-out child does not outlive the pipeline
        let tool_future = Command::new(binary)
            .args(args)
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::select! {
            result = tool_future => {
                result.map_err(|e| EncoderError::Launch {
                    tool: tool.to_string(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(EncoderError::Timeout {
                    tool: tool.to_string(),
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_encoder_stderr(&stderr);
            error!("{} invocation failed: {}", tool, filtered);
            return Err(EncoderError::ExitStatus {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr: filtered,
            });
        }

        Ok(output)
    }
}

/// A clip is usable once it exists with a non-zero size
fn clip_is_usable(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

/// Escape text for embedding inside a drawtext filter argument
///
/// Backslash first, then the characters that terminate or delimit filter
/// values: quote, colon, percent, comma.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            ':' => escaped.push_str("\\:"),
            '%' => escaped.push_str("\\%"),
            ',' => escaped.push_str("\\,"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Format the concat manifest: one `file '<path>'` line per clip, in order
pub fn format_manifest(clips: &[PathBuf]) -> String {
    let mut manifest = String::new();
    for clip in clips {
        manifest.push_str(&format!("file '{}'\n", clip.to_string_lossy()));
    }
    manifest
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_encoder_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown encoder error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
