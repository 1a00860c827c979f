//! Lexical cross-scoring of (claim, chunk) pairs
//!
//! [`LexicalReranker`] reads both texts together and scores how much of the
//! claim's content vocabulary the chunk covers. The raw score mixes recall
//! of claim words with Jaccard overlap and is squashed through a steep
//! sigmoid centred at 0.5, so scores land in (0, 1).

use canon_domain::traits::Reranker;
use std::collections::HashSet;
use std::convert::Infallible;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
    "through", "during", "before", "after", "above", "below", "between", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "just", "and", "but", "if", "or", "because", "until", "while",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "it", "its", "he",
    "she", "his", "her", "him", "they", "them", "their",
];

/// Weight of claim-word recall in the raw score
const RECALL_WEIGHT: f32 = 0.6;

/// Weight of Jaccard overlap in the raw score
const JACCARD_WEIGHT: f32 = 0.4;

/// Sigmoid steepness
const STEEPNESS: f32 = 8.0;

/// Stop-word filtered lexical overlap scorer
#[derive(Debug, Clone)]
pub struct LexicalReranker {
    stop_words: HashSet<&'static str>,
}

impl LexicalReranker {
    /// Create a reranker with the built-in English stop-word list
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn content_words(&self, lowered: &str) -> HashSet<String> {
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !self.stop_words.contains(w))
            .map(str::to_string)
            .collect()
    }

    fn compute_score(&self, query: &str, doc: &str) -> f32 {
        let query_words = self.content_words(&query.to_lowercase());
        let doc_words = self.content_words(&doc.to_lowercase());

        if query_words.is_empty() {
            // Only stop words: fall back to a weak length ratio
            let len_ratio = (query.len().min(doc.len()) as f32)
                / (query.len().max(doc.len()).max(1) as f32);
            return len_ratio * 0.3;
        }

        let matches = query_words.intersection(&doc_words).count();
        let recall = matches as f32 / query_words.len() as f32;

        let union = query_words.union(&doc_words).count();
        let jaccard = if union > 0 {
            matches as f32 / union as f32
        } else {
            0.0
        };

        let base_score = RECALL_WEIGHT * recall + JACCARD_WEIGHT * jaccard;
        let normalized = 1.0 / (1.0 + (-STEEPNESS * (base_score - 0.5)).exp());

        normalized.clamp(0.0, 1.0)
    }
}

impl Default for LexicalReranker {
    fn default() -> Self {
        Self::new()
    }
}

impl Reranker for LexicalReranker {
    type Error = Infallible;

    fn score(&self, query: &str, doc: &str) -> Result<f32, Infallible> {
        Ok(self.compute_score(query, doc))
    }
}
