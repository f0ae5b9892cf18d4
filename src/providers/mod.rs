/*!
 * Provider implementations for speech synthesis.
 *
 * This module contains client implementations for voice providers:
 * - GoogleTranslateTts: the public Google Translate TTS endpoint
 * - MockSynthesizer: stub provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::app_config::{SpeechProvider, VoiceConfig};
use crate::errors::ProviderError;

/// Common trait for all speech synthesis providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the pipeline.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize one text segment into an audio file
    ///
    /// # Arguments
    /// * `text` - The segment text to speak
    /// * `output_path` - Where the audio file is written
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok once the file is on disk, or an error
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError>;

    /// Human-readable provider name used in logs
    fn name(&self) -> &str;
}

/// Build the synthesizer selected by the voice configuration
pub fn create_synthesizer(config: &VoiceConfig) -> Box<dyn SpeechSynthesizer> {
    match config.provider {
        SpeechProvider::GoogleTranslate => Box::new(gtts::GoogleTranslateTts::with_config(config)),
        SpeechProvider::Mock => Box::new(mock::MockSynthesizer::working()),
    }
}

pub mod gtts;
pub mod mock;
