//! On-disk cache of an embedded corpus
//!
//! Embedding a shelf of novels is the slow part of a run, so the chunks and
//! their vectors can be saved to SQLite and reloaded. The cache remembers
//! the chunking parameters, the embedding width, the model name and a
//! digest of the books it was built from; a caller compares that
//! [`CacheFingerprint`] against the current settings and corpus and
//! rebuilds on any mismatch.

use crate::IndexError;
use canon_domain::ChunkRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// Settings that produced a cached index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFingerprint {
    /// Words per chunk
    pub chunk_size: usize,

    /// Words shared by consecutive chunks
    pub overlap: usize,

    /// Embedding width
    pub dimension: usize,

    /// Embedding model identifier
    pub model: String,

    /// [`corpus_digest`] of the indexed books
    pub corpus: String,
}

/// BLAKE3 digest over book titles and texts, as lowercase hex
///
/// Books are hashed in title order, so the digest does not depend on the
/// order they are passed in. Titles and texts are length-prefixed; moving
/// text from one book to another changes the digest.
pub fn corpus_digest<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut books: Vec<_> = books.into_iter().collect();
    books.sort_by(|a, b| a.0.cmp(b.0));

    let mut hasher = blake3::Hasher::new();
    for (name, text) in books {
        for field in [name, text] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// SQLite-backed chunk and vector cache
///
/// SQLite connections are not thread-safe; open one cache per thread.
pub struct IndexCache {
    conn: Connection,
}

impl IndexCache {
    /// Open or create a cache at `path`
    ///
    /// Use `:memory:` for a throwaway cache in tests.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(cache)
    }

    /// Read the stored fingerprint, if the cache has been written
    pub fn fingerprint(&self) -> Result<Option<CacheFingerprint>, IndexError> {
        let chunk_size = self.meta_usize("chunk_size")?;
        let overlap = self.meta_usize("overlap")?;
        let dimension = self.meta_usize("dimension")?;
        let model = self.meta("model")?;
        let corpus = self.meta("corpus")?;

        match (chunk_size, overlap, dimension, model, corpus) {
            (Some(chunk_size), Some(overlap), Some(dimension), Some(model), Some(corpus)) => {
                Ok(Some(CacheFingerprint {
                    chunk_size,
                    overlap,
                    dimension,
                    model,
                    corpus,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Replace the cache contents
    ///
    /// Runs in one transaction; a failure leaves the previous contents.
    pub fn save<'a, I>(&mut self, fingerprint: &CacheFingerprint, entries: I) -> Result<usize, IndexError>
    where
        I: IntoIterator<Item = (&'a ChunkRecord, &'a [f32])>,
    {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM chunks", [])?;
        tx.execute("DELETE FROM cache_meta", [])?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO chunks (id, book_name, chunk_text, relative_position, vector)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (record, vector) in entries {
                if vector.len() != fingerprint.dimension {
                    return Err(IndexError::DimensionMismatch {
                        expected: fingerprint.dimension,
                        actual: vector.len(),
                    });
                }
                stmt.execute(params![
                    count as i64,
                    record.book_name,
                    record.text,
                    record.relative_position,
                    encode_vector(vector),
                ])?;
                count += 1;
            }
        }

        let mut meta = tx.prepare("INSERT INTO cache_meta (key, value) VALUES (?1, ?2)")?;
        meta.execute(params!["chunk_size", fingerprint.chunk_size.to_string()])?;
        meta.execute(params!["overlap", fingerprint.overlap.to_string()])?;
        meta.execute(params!["dimension", fingerprint.dimension.to_string()])?;
        meta.execute(params!["model", fingerprint.model])?;
        meta.execute(params!["corpus", fingerprint.corpus])?;
        drop(meta);

        tx.commit()?;
        debug!("Saved {} chunks to index cache", count);
        Ok(count)
    }

    /// Load every cached chunk with its vector, in saved order
    pub fn load(&self) -> Result<Vec<(ChunkRecord, Vec<f32>)>, IndexError> {
        let mut stmt = self.conn.prepare(
            "SELECT book_name, chunk_text, relative_position, vector FROM chunks ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (book_name, text, relative_position, blob) = row?;
            let vector = decode_vector(&blob)?;
            entries.push((ChunkRecord::new(book_name, text, relative_position), vector));
        }
        Ok(entries)
    }

    fn meta(&self, key: &str) -> Result<Option<String>, IndexError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM cache_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn meta_usize(&self, key: &str) -> Result<Option<usize>, IndexError> {
        match self.meta(key)? {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| IndexError::InvalidData(format!("Bad cache value for {}: {}", key, value))),
            None => Ok(None),
        }
    }
}

/// Little-endian f32 packing
fn encode_vector(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn decode_vector(bytes: &[u8]) -> Result<Vec<f32>, IndexError> {
    if bytes.len() % 4 != 0 {
        return Err(IndexError::InvalidData(format!(
            "Vector blob length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_blob_layout() {
        let bytes = encode_vector(&[1.0, -0.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(decode_vector(&bytes).unwrap(), vec![1.0, -0.5]);
    }

    #[test]
    fn test_truncated_blob_rejected() {
        assert!(matches!(decode_vector(&[0, 0, 0]), Err(IndexError::InvalidData(_))));
    }

    #[test]
    fn test_corpus_digest_tracks_books() {
        let base = corpus_digest([("Emma", "handsome clever and rich"), ("Persuasion", "Anne")]);

        let reordered = corpus_digest([("Persuasion", "Anne"), ("Emma", "handsome clever and rich")]);
        assert_eq!(base, reordered);
        assert_eq!(base.len(), 64);

        assert_ne!(base, corpus_digest([("Emma", "handsome clever and rich")]));
        assert_ne!(base, corpus_digest([("Emma", "handsome clever"), ("Persuasion", "Anne")]));
        assert_ne!(
            corpus_digest([("ab", "c")]),
            corpus_digest([("a", "bc")]),
            "title/text boundary must matter"
        );
    }

    #[test]
    fn test_fresh_cache_has_no_fingerprint() {
        let cache = IndexCache::open(":memory:").unwrap();
        assert_eq!(cache.fingerprint().unwrap(), None);
        assert!(cache.load().unwrap().is_empty());
    }
}
