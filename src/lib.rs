/*!
 * # quotereel - Anime quote shorts generator
 *
 * A Rust library for turning quotes into short vertical videos with
 * synthesized voice-over and burned-in text.
 *
 * ## Features
 *
 * - Pick a quote from an external JSON quote library
 * - Cover-resize a background image to the target resolution
 * - Split the quote into sentence-like segments
 * - Synthesize per-segment speech via a network TTS provider
 * - Render one clip per segment (image + text overlay + voice) with ffmpeg
 * - Concatenate the clips into a single final video
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `quote`: Quote records and quote library loading
 * - `segmenter`: Quote segmentation on sentence boundaries
 * - `image_compositor`: Background image cover-resize
 * - `providers`: Clients for speech synthesis services:
 *   - `providers::gtts`: Google Translate TTS client
 *   - `providers::mock`: Stub provider for tests
 * - `encoder`: ffmpeg/ffprobe invocations (render, probe, concat)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoder;
pub mod errors;
pub mod file_utils;
pub mod image_compositor;
pub mod providers;
pub mod quote;
pub mod segmenter;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, EncoderError, PipelineError, ProviderError};
pub use quote::{Quote, QuoteLibrary};
