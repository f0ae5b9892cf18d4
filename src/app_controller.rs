use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::encoder::{self, Encoder, RenderJob};
use crate::file_utils::FileManager;
use crate::image_compositor;
use crate::providers::{self, SpeechSynthesizer};
use crate::quote::{Quote, QuoteLibrary};
use crate::segmenter;

// @module: Application controller for the quote video pipeline

/// Name of the per-run log file written beside the final video
pub const RUN_LOG_FILENAME: &str = "video_creation.log";

/// Main application controller for quote video generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self { config };

        Ok(controller)
    }

    /// Run the full pipeline: pick a quote, prepare the background, then
    /// synthesize, render, and concatenate one clip per segment.
    ///
    /// Returns the path of the final video file.
    pub async fn run(
        &self,
        quotes_file: PathBuf,
        background_image: PathBuf,
        output_dir: PathBuf,
        quote_index: Option<usize>,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !quotes_file.exists() {
            return Err(anyhow::anyhow!("Quotes file does not exist: {:?}", quotes_file));
        }
        if !background_image.exists() {
            return Err(anyhow::anyhow!(
                "Background image does not exist: {:?}",
                background_image
            ));
        }

        FileManager::ensure_dir(&output_dir)?;
        let run_log = output_dir.join(RUN_LOG_FILENAME);

        // QuoteSelected
        let library = QuoteLibrary::load_from_file(&quotes_file)?;
        let quote = match quote_index {
            Some(index) => library.pick_index(index)?,
            None => library.pick_random()?,
        };
        info!("Selected quote: {}", quote);
        self.log_run(&run_log, "INFO", &format!("Selected quote: {}", quote));

        let output_path = output_dir.join(quote.output_filename());
        if output_path.exists() && !force_overwrite {
            warn!("Skipping, output already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(output_path);
        }

        // One temp working directory per run; kept on failure for inspection
        let workdir = tempfile::Builder::new()
            .prefix("quotereel-")
            .tempdir()
            .context("Failed to create temporary working directory")?;
        debug!("Temporary working directory: {:?}", workdir.path());

        let result = self
            .run_pipeline(quote, &background_image, workdir.path(), &output_path, &run_log)
            .await;

        match result {
            Ok(()) => {
                if self.config.keep_temp_files {
                    let kept = workdir.into_path();
                    info!("Keeping temporary files in {:?}", kept);
                }

                let elapsed = start_time.elapsed();
                info!(
                    "Video created: {:?} in {}",
                    output_path,
                    Self::format_duration(elapsed)
                );
                self.log_run(&run_log, "INFO", &format!("Video created: {:?}", output_path));

                Ok(output_path)
            }
            Err(e) => {
                let kept = workdir.into_path();
                error!("Pipeline failed: {:#}. Temp artifacts kept in {:?}", e, kept);
                self.log_run(&run_log, "ERROR", &format!("Pipeline failed: {:#}", e));

                Err(e)
            }
        }
    }

    /// The linear pipeline body, from image preparation to concatenation
    async fn run_pipeline(
        &self,
        quote: &Quote,
        background_image: &Path,
        workdir: &Path,
        output_path: &Path,
        run_log: &Path,
    ) -> Result<()> {
        // ImagePrepared
        let prepared_background = workdir.join("background.png");
        image_compositor::prepare_background(
            background_image,
            self.config.output.resolution(),
            &prepared_background,
        )?;
        self.log_run(run_log, "INFO", &format!("Image resized: {:?}", background_image));

        // SegmentsComputed
        let segments = segmenter::split_into_segments(&quote.text)?;
        self.log_run(
            run_log,
            "INFO",
            &format!("Quote divided into {} part(s)", segments.len()),
        );

        let synthesizer = providers::create_synthesizer(&self.config.voice);
        let encoder = Encoder::new(self.config.encoder.clone(), self.config.output.clone());

        info!(
            "quotereel: {} - {} segment(s)",
            synthesizer.name(),
            segments.len()
        );

        let progress_bar = ProgressBar::new(segments.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        // PerSegmentLoop: Synthesize -> Measure -> Render
        let mut clips = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            progress_bar.set_message(format!("segment {}", i + 1));

            let clip = self
                .process_segment(i, segment, &prepared_background, workdir, synthesizer.as_ref(), &encoder)
                .await?;
            self.log_run(run_log, "INFO", &format!("Video part created: {:?}", clip));

            clips.push(clip);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        // ManifestWritten
        let manifest_path = workdir.join("concat.txt");
        FileManager::write_to_file(&manifest_path, &encoder::format_manifest(&clips))?;
        self.log_run(run_log, "INFO", "Video parts listed for concatenation");

        // Concatenated
        encoder.concat(&manifest_path, output_path).await?;
        self.log_run(run_log, "INFO", &format!("Video concatenated: {:?}", output_path));

        Ok(())
    }

    /// Synthesize, measure, and render one segment; returns the clip path
    async fn process_segment(
        &self,
        index: usize,
        segment: &str,
        background: &Path,
        workdir: &Path,
        synthesizer: &dyn SpeechSynthesizer,
        encoder: &Encoder,
    ) -> Result<PathBuf> {
        let voice_path = workdir.join(format!("part_{}_voice.mp3", index));
        synthesizer
            .synthesize(segment, &voice_path)
            .await
            .with_context(|| format!("Speech synthesis failed for segment {}", index))?;

        let duration_secs = encoder
            .probe_duration(&voice_path)
            .await
            .with_context(|| format!("Duration probe failed for segment {}", index))?;

        let clip_path = workdir.join(format!("part_{}.ts", index));
        let job = RenderJob {
            background: background.to_path_buf(),
            voice: voice_path,
            text: segment.to_string(),
            duration_secs,
            output: clip_path.clone(),
        };
        encoder
            .render_clip(&job)
            .await
            .with_context(|| format!("Clip render failed for segment {}", index))?;

        Ok(clip_path)
    }

    /// Append a line to the run log file; log writing must never abort the pipeline
    fn log_run(&self, run_log: &Path, level: &str, message: &str) {
        if let Err(e) = FileManager::append_to_log_file(run_log, level, message) {
            warn!("Failed to write run log: {}", e);
        }
    }

    /// Format a duration as a compact human-readable string
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}
