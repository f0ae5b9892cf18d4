use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Output video settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Voice synthesis config
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Encoder (ffmpeg/ffprobe) config
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Keep the temporary working directory after a successful run
    #[serde(default)]
    pub keep_temp_files: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech synthesis provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    // @provider: Google Translate TTS
    #[default]
    GoogleTranslate,
    // @provider: Mock (testing only, writes silent stub audio)
    Mock,
}

impl SpeechProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::GoogleTranslate => "Google Translate TTS",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::GoogleTranslate => "googletranslate".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for SpeechProvider
impl std::fmt::Display for SpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for SpeechProvider
impl std::str::FromStr for SpeechProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "googletranslate" | "gtts" => Ok(Self::GoogleTranslate),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Output video geometry and burned-in text style
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Target video width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Target video height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Font file used by the drawtext filter
    #[serde(default = "default_font_file")]
    pub font_file: String,

    /// Font size for the burned-in text
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Font color for the burned-in text
    #[serde(default = "default_font_color")]
    pub font_color: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            font_file: default_font_file(),
            font_size: default_font_size(),
            font_color: default_font_color(),
        }
    }
}

impl OutputConfig {
    /// Target resolution as a (width, height) pair
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Voice synthesis service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// Service endpoint URL
    #[serde(default = "default_voice_endpoint")]
    pub endpoint: String,

    /// Spoken language code (e.g., "en")
    #[serde(default = "default_voice_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_voice_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of retry attempts per segment
    #[serde(default = "default_voice_retry_count")]
    pub retry_count: u32,

    /// Base backoff time in milliseconds for exponential backoff
    #[serde(default = "default_voice_backoff_ms")]
    pub backoff_base_ms: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            endpoint: default_voice_endpoint(),
            language: default_voice_language(),
            timeout_secs: default_voice_timeout_secs(),
            retry_count: default_voice_retry_count(),
            backoff_base_ms: default_voice_backoff_ms(),
        }
    }
}

/// External encoder configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EncoderConfig {
    /// Path or name of the ffmpeg binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Path or name of the ffprobe binary
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Timeout in seconds for a single encoder invocation
    #[serde(default = "default_encoder_timeout_secs")]
    pub timeout_secs: u64,

    /// Suppress encoder console output (-loglevel panic)
    #[serde(default = "default_true")]
    pub hide_output: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_encoder_timeout_secs(),
            hide_output: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920
}

fn default_font_file() -> String {
    "font.ttf".to_string()
}

fn default_font_size() -> u32 {
    36
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_voice_endpoint() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_voice_language() -> String {
    "en".to_string()
}

fn default_voice_timeout_secs() -> u64 {
    30
}

fn default_voice_retry_count() -> u32 {
    3
}

fn default_voice_backoff_ms() -> u64 {
    1000
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_encoder_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(anyhow!(
                "Invalid output resolution: {}x{}",
                self.output.width,
                self.output.height
            ));
        }

        if self.output.font_size == 0 {
            return Err(anyhow!("Font size must be greater than zero"));
        }

        if self.voice.provider == SpeechProvider::GoogleTranslate {
            if self.voice.endpoint.is_empty() {
                return Err(anyhow!("Voice endpoint is required for the Google Translate provider"));
            }
            if self.voice.language.is_empty() {
                return Err(anyhow!("Voice language is required for the Google Translate provider"));
            }
        }

        if self.encoder.ffmpeg_path.is_empty() || self.encoder.ffprobe_path.is_empty() {
            return Err(anyhow!("Encoder binary paths must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output: OutputConfig::default(),
            voice: VoiceConfig::default(),
            encoder: EncoderConfig::default(),
            keep_temp_files: false,
            log_level: LogLevel::default(),
        }
    }
}
