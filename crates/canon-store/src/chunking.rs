//! Sliding-window chunking of book text
//!
//! A book is split on whitespace into words and cut into windows of
//! `chunk_size` words whose starts are `chunk_size - overlap` words apart.
//! Each window is tagged with the relative position of its first word.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Largest relative position a chunk can carry; keeps positions in [0, 1)
const MAX_RELATIVE_POSITION: f64 = 0.999;

/// Errors raised by an invalid chunking configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkingError {
    /// Window size or overlap make the step non-positive
    #[error("Invalid chunking configuration: {0}")]
    InvalidConfig(String),
}

/// Window parameters, in words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Words per chunk
    pub chunk_size: usize,

    /// Words shared by consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2048,
            overlap: 256,
        }
    }
}

impl ChunkingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ChunkingError> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::InvalidConfig(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkingError::InvalidConfig(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Distance in words between consecutive chunk starts
    pub fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap)
    }
}

/// One window of a book
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    /// Words of the window joined by single spaces
    pub text: String,

    /// Start offset over word count, rounded to three decimals
    pub relative_position: f64,

    /// Word offsets covered by this window
    pub word_range: Range<usize>,
}

/// Splits text into overlapping, position-tagged word windows
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkingConfig,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfig`] when `overlap >= chunk_size`.
    pub fn new(config: ChunkingConfig) -> Result<Self, ChunkingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the chunker configuration
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk the given text
    ///
    /// The returned iterator is lazy and can be cloned to restart it. Text
    /// with no words yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_store::{ChunkingConfig, TextChunker};
    ///
    /// let chunker = TextChunker::new(ChunkingConfig { chunk_size: 4, overlap: 1 }).unwrap();
    /// let chunks: Vec<_> = chunker.chunk("a b c d e f g").collect();
    /// assert_eq!(chunks.len(), 3);
    /// assert_eq!(chunks[0].text, "a b c d");
    /// assert_eq!(chunks[1].text, "d e f g");
    /// assert_eq!(chunks[2].text, "g");
    /// ```
    pub fn chunk<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            words: text.split_whitespace().collect(),
            chunk_size: self.config.chunk_size,
            step: self.config.step(),
            next_start: 0,
        }
    }
}

/// Lazy iterator over the windows of one text
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: Vec<&'a str>,
    chunk_size: usize,
    step: usize,
    next_start: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = TextChunk;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.words.len();
        let start = self.next_start;
        if start >= total {
            return None;
        }

        let end = (start + self.chunk_size).min(total);
        self.next_start = start + self.step;

        Some(TextChunk {
            text: self.words[start..end].join(" "),
            relative_position: relative_position(start, total),
            word_range: start..end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.words.len();
        if self.next_start >= total {
            return (0, Some(0));
        }
        let remaining = (total - self.next_start).div_ceil(self.step);
        (remaining, Some(remaining))
    }
}

fn relative_position(start: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rounded = (start as f64 / total as f64 * 1000.0).round() / 1000.0;
    rounded.min(MAX_RELATIVE_POSITION)
}
