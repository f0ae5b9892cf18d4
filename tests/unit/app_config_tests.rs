/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use quotereel::app_config::{Config, LogLevel, SpeechProvider};

/// Test default configuration values
#[test]
fn test_default_config_withNoInput_shouldUseVerticalVideoDefaults() {
    let config = Config::default();

    assert_eq!(config.output.width, 1080);
    assert_eq!(config.output.height, 1920);
    assert_eq!(config.output.resolution(), (1080, 1920));
    assert_eq!(config.output.font_size, 36);
    assert_eq!(config.output.font_color, "white");
    assert_eq!(config.voice.provider, SpeechProvider::GoogleTranslate);
    assert_eq!(config.voice.language, "en");
    assert_eq!(config.encoder.ffmpeg_path, "ffmpeg");
    assert_eq!(config.encoder.ffprobe_path, "ffprobe");
    assert!(config.encoder.hide_output);
    assert!(!config.keep_temp_files);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that the default configuration validates
#[test]
fn test_validate_withDefaults_shouldSucceed() {
    assert!(Config::default().validate().is_ok());
}

/// Test serialization round-trip through JSON
#[test]
fn test_config_serde_withRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.output.width = 720;
    config.output.height = 1280;
    config.voice.language = "ja".to_string();
    config.keep_temp_files = true;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.output.width, 720);
    assert_eq!(parsed.output.height, 1280);
    assert_eq!(parsed.voice.language, "ja");
    assert!(parsed.keep_temp_files);
}

/// Test that a partial config file falls back to defaults for missing fields
#[test]
fn test_config_serde_withPartialJson_shouldFillDefaults() {
    let parsed: Config = serde_json::from_str(r#"{"voice": {"language": "fr"}}"#).unwrap();

    assert_eq!(parsed.voice.language, "fr");
    assert_eq!(parsed.output.width, 1080);
    assert_eq!(parsed.encoder.ffmpeg_path, "ffmpeg");
}

/// Test validation failures for broken geometry
#[test]
fn test_validate_withZeroResolution_shouldFail() {
    let mut config = Config::default();
    config.output.width = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.output.height = 0;
    assert!(config.validate().is_err());
}

/// Test validation failures for an unusable voice configuration
#[test]
fn test_validate_withEmptyVoiceEndpoint_shouldFail() {
    let mut config = Config::default();
    config.voice.endpoint = String::new();
    assert!(config.validate().is_err());
}

/// Test that the mock provider skips the endpoint requirement
#[test]
fn test_validate_withMockProviderAndEmptyEndpoint_shouldSucceed() {
    let mut config = Config::default();
    config.voice.provider = SpeechProvider::Mock;
    config.voice.endpoint = String::new();
    assert!(config.validate().is_ok());
}

/// Test validation failure for empty encoder paths
#[test]
fn test_validate_withEmptyEncoderPath_shouldFail() {
    let mut config = Config::default();
    config.encoder.ffmpeg_path = String::new();
    assert!(config.validate().is_err());
}

/// Test provider parsing and display round-trip
#[test]
fn test_speech_provider_withStringConversions_shouldRoundTrip() {
    assert_eq!(
        SpeechProvider::from_str("googletranslate").unwrap(),
        SpeechProvider::GoogleTranslate
    );
    assert_eq!(SpeechProvider::from_str("gtts").unwrap(), SpeechProvider::GoogleTranslate);
    assert_eq!(SpeechProvider::from_str("mock").unwrap(), SpeechProvider::Mock);
    assert!(SpeechProvider::from_str("espeak").is_err());

    assert_eq!(SpeechProvider::GoogleTranslate.to_string(), "googletranslate");
    assert_eq!(SpeechProvider::GoogleTranslate.display_name(), "Google Translate TTS");
}
