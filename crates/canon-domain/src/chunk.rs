//! Chunk records produced when a book is indexed

use std::fmt;

/// Stable handle of a chunk inside an evidence index
///
/// Identity is the chunk's position in the index, not its content: two
/// chunks with identical text are still distinct evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(usize);

impl ChunkId {
    /// Create a handle from a raw index position
    pub fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// Get the raw index position
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk#{}", self.0)
    }
}

/// A window of words from one book
///
/// Created once per book during indexing and immutable afterwards. The
/// vector lives alongside the record in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRecord {
    /// Name of the book the chunk was cut from
    pub book_name: String,

    /// The chunk's words joined by single spaces
    pub text: String,

    /// Offset of the chunk's first word divided by the book's word count,
    /// rounded to three decimals; always in [0, 1)
    pub relative_position: f64,
}

impl ChunkRecord {
    /// Create a new chunk record
    pub fn new(book_name: impl Into<String>, text: impl Into<String>, relative_position: f64) -> Self {
        Self {
            book_name: book_name.into(),
            text: text.into(),
            relative_position,
        }
    }
}
