/*!
 * Error types for the quotereel application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("TTS request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("TTS provider responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the provider
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider returned an empty or unusable audio payload
    #[error("Empty audio response for segment: {0}")]
    EmptyResponse(String),

    /// Error writing the synthesized audio to disk
    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when invoking ffmpeg/ffprobe
#[derive(Error, Debug)]
pub enum EncoderError {
    /// The encoder binary could not be launched
    #[error("Failed to launch {tool}: {message}")]
    Launch {
        /// Tool name (ffmpeg or ffprobe)
        tool: String,
        /// Underlying launch error
        message: String,
    },

    /// The encoder exited with a non-zero status
    #[error("{tool} exited with {status}: {stderr}")]
    ExitStatus {
        /// Tool name (ffmpeg or ffprobe)
        tool: String,
        /// Exit status description
        status: String,
        /// Filtered stderr output
        stderr: String,
    },

    /// The encoder did not finish within the configured time budget
    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout {
        /// Tool name (ffmpeg or ffprobe)
        tool: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// ffprobe output could not be parsed into a duration
    #[error("Failed to parse probe output: {0}")]
    ProbeParse(String),

    /// The encoder reported success but the expected output file is missing or empty
    #[error("Encoder produced no usable output: {0}")]
    MissingOutput(String),
}

/// Errors that can occur while running the pipeline itself
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The quote contains no speakable text
    #[error("Quote contains no speakable text")]
    EmptyQuote,

    /// The quote library file contains no quotes
    #[error("Quote library contains no quotes")]
    EmptyLibrary,

    /// Error from the speech provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from an encoder invocation
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from image loading or compositing
    #[error("Image error: {0}")]
    Image(String),

    /// Error from a speech provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from an encoder invocation
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(error: image::ImageError) -> Self {
        Self::Image(error.to_string())
    }
}
