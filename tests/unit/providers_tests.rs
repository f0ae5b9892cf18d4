/*!
 * Tests for speech provider implementations
 */

use std::fs;

use quotereel::app_config::{SpeechProvider, VoiceConfig};
use quotereel::errors::ProviderError;
use quotereel::providers::mock::MockSynthesizer;
use quotereel::providers::{create_synthesizer, SpeechSynthesizer};
use crate::common;

/// Test that the working mock writes a non-empty audio file
#[tokio::test]
async fn test_mock_working_withSegmentText_shouldWriteStubAudio() {
    let temp_dir = common::create_temp_dir().unwrap();
    let output = temp_dir.path().join("part_0_voice.mp3");

    let synthesizer = MockSynthesizer::working();
    synthesizer.synthesize("Believe it!", &output).await.unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(!bytes.is_empty());
    assert!(String::from_utf8_lossy(&bytes).contains("Believe it!"));
    assert_eq!(synthesizer.request_count(), 1);
}

/// Test that the failing mock returns a connection error and writes nothing
#[tokio::test]
async fn test_mock_failing_withSegmentText_shouldErrorWithoutFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let output = temp_dir.path().join("part_0_voice.mp3");

    let synthesizer = MockSynthesizer::failing();
    let result = synthesizer.synthesize("Believe it!", &output).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    assert!(!output.exists());
}

/// Test the intermittent mock fails exactly every Nth request
#[tokio::test]
async fn test_mock_intermittent_withFailEveryThree_shouldFailOnThirdCall() {
    let temp_dir = common::create_temp_dir().unwrap();
    let synthesizer = MockSynthesizer::intermittent(3);

    for i in 1..=6 {
        let output = temp_dir.path().join(format!("part_{}.mp3", i));
        let result = synthesizer.synthesize("text", &output).await;
        if i % 3 == 0 {
            assert!(result.is_err(), "call {} should fail", i);
        } else {
            assert!(result.is_ok(), "call {} should succeed", i);
        }
    }
}

/// Test that the empty mock produces a zero-length file
#[tokio::test]
async fn test_mock_empty_withSegmentText_shouldWriteEmptyFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let output = temp_dir.path().join("part_0_voice.mp3");

    MockSynthesizer::empty().synthesize("text", &output).await.unwrap();

    assert_eq!(fs::metadata(&output).unwrap().len(), 0);
}

/// Test the factory picks the provider named by the configuration
#[test]
fn test_create_synthesizer_withConfiguredProvider_shouldMatchName() {
    let gtts_config = VoiceConfig::default();
    assert_eq!(create_synthesizer(&gtts_config).name(), "Google Translate TTS");

    let mock_config = VoiceConfig {
        provider: SpeechProvider::Mock,
        ..VoiceConfig::default()
    };
    assert_eq!(create_synthesizer(&mock_config).name(), "Mock");
}
