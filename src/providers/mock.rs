/*!
 * Mock speech provider for testing.
 *
 * This module provides a synthesizer that simulates different behaviors:
 * - `MockSynthesizer::working()` - Always succeeds, writes stub audio bytes
 * - `MockSynthesizer::failing()` - Always fails with an error
 * - `MockSynthesizer::slow()` - Succeeds after a delay (for timeout testing)
 * - `MockSynthesizer::empty()` - Writes an empty file
 */

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::SpeechSynthesizer;

/// Behavior mode for the mock synthesizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with stub audio bytes
    Working,
    /// Always fails with a connection error
    Failing,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64 },
    /// Writes an empty audio file
    Empty,
}

/// Mock synthesizer for testing pipeline behavior
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a slow mock that sleeps before succeeding
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock that writes empty files
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of synthesize calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Stub payload written for a segment; not a real MP3, just enough to
    /// make the file non-empty and traceable back to its text
    fn stub_audio(text: &str) -> Vec<u8> {
        format!("MOCK_AUDIO:{}", text).into_bytes()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => {
                tokio::fs::write(output_path, Self::stub_audio(text)).await?;
                Ok(())
            }
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::ConnectionError(format!(
                        "mock provider failing on request {}",
                        count
                    )))
                } else {
                    tokio::fs::write(output_path, Self::stub_audio(text)).await?;
                    Ok(())
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                tokio::fs::write(output_path, Self::stub_audio(text)).await?;
                Ok(())
            }
            MockBehavior::Empty => {
                tokio::fs::write(output_path, Vec::new()).await?;
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
