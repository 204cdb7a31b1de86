//! Token-bounded hierarchical chunking.
//!
//! The pipeline runs in fixed stages, each a pure transformation:
//! flatten the item tree while tracking heading context, segment at
//! heading boundaries, fold orphan headings forward, pack sections
//! under the token budget (splitting sections that alone exceed it),
//! and materialize the final chunks. All mutable state is local to one
//! [`Chunker::chunk`] call, so a single `Chunker` can serve documents
//! from concurrent requests.

mod emit;
mod flatten;
mod pack;
mod section;
mod split;

use crate::error::{Error, Result};
use crate::model::{Chunk, DocumentTree};
use crate::tokenize::{TokenCounter, Tokenizer, WordEstimateTokenizer};

/// Options for chunking a document tree.
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Maximum tokens per chunk
    pub max_tokens: usize,

    /// Delimiter joining texts within a chunk
    pub delimiter: String,

    /// Merge consecutive list items into one pseudo-item
    pub merge_list_items: bool,

    /// Accumulate adjacent sections into shared chunks
    pub merge_peers: bool,
}

impl ChunkOptions {
    /// Create options with the given token budget and defaults.
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            delimiter: "\n".into(),
            merge_list_items: false,
            merge_peers: true,
        }
    }

    /// Set the text delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Enable or disable list-item merging.
    pub fn with_merge_list_items(mut self, merge: bool) -> Self {
        self.merge_list_items = merge;
        self
    }

    /// Enable or disable cross-section accumulation.
    pub fn with_merge_peers(mut self, merge: bool) -> Self {
        self.merge_peers = merge;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(Error::InvalidBudget("max_tokens must be positive".into()));
        }
        Ok(())
    }
}

/// Document chunker over a pluggable tokenizer.
///
/// # Example
///
/// ```
/// use docchunk::{ChunkOptions, Chunker, DocumentTree};
///
/// let mut tree = DocumentTree::new("policy");
/// tree.add_title("Policy");
/// tree.add_paragraph("All visitors must sign in at the front desk.");
///
/// let chunker = Chunker::new(ChunkOptions::new(512))?;
/// let chunks = chunker.chunk(&tree);
/// assert!(!chunks.is_empty());
/// # Ok::<(), docchunk::Error>(())
/// ```
pub struct Chunker<T = WordEstimateTokenizer> {
    options: ChunkOptions,
    counter: TokenCounter<T>,
}

impl Chunker<WordEstimateTokenizer> {
    /// Create a chunker using the word-estimate tokenizer.
    pub fn new(options: ChunkOptions) -> Result<Self> {
        Self::with_tokenizer(options, WordEstimateTokenizer)
    }
}

impl<T: Tokenizer> Chunker<T> {
    /// Create a chunker with a specific tokenizer backend.
    pub fn with_tokenizer(options: ChunkOptions, tokenizer: T) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            counter: TokenCounter::new(tokenizer),
        })
    }

    /// The configured options.
    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Chunk a document tree.
    ///
    /// Always returns at least one chunk: a document with no usable
    /// content yields the placeholder chunk. Never fails; degraded
    /// inputs (tokenizer errors, over-budget sections) fall back as
    /// documented in the stage modules.
    pub fn chunk(&self, tree: &DocumentTree) -> Vec<Chunk> {
        let flat = flatten::flatten(tree, &self.options);
        if flat.is_empty() {
            log::debug!("document {:?} has no items; emitting placeholder", tree.name);
            return vec![emit::placeholder_chunk()];
        }

        let sections = section::segment(flat, &self.options);
        let sections = section::merge_orphans(sections, &self.options);
        let chunks = pack::pack(sections, &self.counter, &self.options);

        if chunks.is_empty() {
            // Every section was dropped as budget-unsatisfiable.
            return vec![emit::placeholder_chunk()];
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_rejected() {
        let result = Chunker::new(ChunkOptions::new(0));
        assert!(matches!(result, Err(Error::InvalidBudget(_))));
    }

    #[test]
    fn test_empty_tree_placeholder() {
        let tree = DocumentTree::new("empty");
        let chunker = Chunker::new(ChunkOptions::new(64)).unwrap();
        let chunks = chunker.chunk(&tree);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, ".");
        assert_eq!(chunks[0].source_items.len(), 1);
    }

    #[test]
    fn test_options_builder() {
        let options = ChunkOptions::new(128)
            .with_delimiter("\n\n")
            .with_merge_list_items(true)
            .with_merge_peers(false);
        assert_eq!(options.max_tokens, 128);
        assert_eq!(options.delimiter, "\n\n");
        assert!(options.merge_list_items);
        assert!(!options.merge_peers);
    }

    #[test]
    fn test_determinism() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("T");
        tree.add_heading("A", 1);
        tree.add_paragraph("alpha beta gamma delta epsilon zeta");
        tree.add_heading("B", 1);
        tree.add_paragraph("eta theta iota kappa lambda mu");

        let chunker = Chunker::new(ChunkOptions::new(12)).unwrap();
        let first = chunker.chunk(&tree);
        let second = chunker.chunk(&tree);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.used_headers, b.used_headers);
        }
    }
}
