use anyhow::{anyhow, Context, Result};
use log::debug;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::PipelineError;

// @module: Quote records and quote library loading

// @struct: Single quote record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    // @field: Quote text
    #[serde(rename = "quote")]
    pub text: String,

    // @field: Character who said it
    pub character: String,

    // @field: Series the character belongs to
    pub anime: String,
}

impl Quote {
    /// Create a new quote record - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(text: impl Into<String>, character: impl Into<String>, anime: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            character: character.into(),
            anime: anime.into(),
        }
    }

    /// Derive the final video filename from the anime and character fields
    ///
    /// Path separators and control characters are replaced and whitespace runs
    /// collapsed to single underscores so the name is safe on every filesystem.
    pub fn output_filename(&self) -> String {
        format!(
            "{}_{}_quote.mp4",
            sanitize_component(&self.anime),
            sanitize_component(&self.character)
        )
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" - {} ({})", self.text, self.character, self.anime)
    }
}

/// Replace filesystem-hostile characters in a filename component
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Collection of quotes loaded from an external JSON file
#[derive(Debug)]
pub struct QuoteLibrary {
    /// All quotes in file order
    pub quotes: Vec<Quote>,
}

impl QuoteLibrary {
    /// Load a quote library from a JSON array file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quotes file: {:?}", path))?;

        let quotes: Vec<Quote> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse quotes file: {:?}", path))?;

        debug!("Loaded {} quotes from {:?}", quotes.len(), path);

        Ok(QuoteLibrary { quotes })
    }

    /// Pick a random quote from the library
    pub fn pick_random(&self) -> Result<&Quote> {
        self.quotes
            .choose(&mut rand::rng())
            .ok_or_else(|| PipelineError::EmptyLibrary.into())
    }

    /// Pick a quote by index, for reproducible runs
    pub fn pick_index(&self, index: usize) -> Result<&Quote> {
        self.quotes.get(index).ok_or_else(|| {
            anyhow!(
                "Quote index {} out of range (library has {} quotes)",
                index,
                self.quotes.len()
            )
        })
    }

    /// Number of quotes in the library
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the library holds no quotes
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
