//! # docchunk
//!
//! Token-bounded hierarchical chunking for structured documents.
//!
//! This library takes a document-item tree produced by an external
//! parsing backend (PDF, DOCX, PPTX, OCR output) and turns it into an
//! ordered sequence of bounded-size text chunks suitable for
//! embedding and indexing in a retrieval system.
//!
//! ## Quick Start
//!
//! ```
//! use docchunk::{chunk_tree, DocumentTree};
//!
//! let mut tree = DocumentTree::new("handbook");
//! tree.add_title("Employee Handbook");
//! tree.add_heading("Leave", 1);
//! tree.add_paragraph("Employees accrue two days of leave per month.");
//!
//! let chunks = chunk_tree(&tree, 512)?;
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].used_headers, vec!["Employee Handbook", "Leave"]);
//! # Ok::<(), docchunk::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Structure-aware packing**: chunks follow heading boundaries; a
//!   section opening at a shallower level always starts a new chunk
//! - **Token budgets**: pluggable tokenizer behind a resilient,
//!   buffered counter with a word-count fallback
//! - **Graceful degradation**: oversized sections split along row or
//!   text boundaries instead of failing the document
//! - **Header provenance**: every chunk carries the headings active
//!   over its items, plus page ranges from item provenance

pub mod chunker;
pub mod error;
pub mod model;
pub mod tokenize;

// Re-export commonly used types
pub use chunker::{ChunkOptions, Chunker};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Chunk, DocumentItem, DocumentTree, HeaderSnapshot, ItemBody, Provenance, Table,
    TableCell, TableRow,
};
pub use tokenize::{TokenCounter, Tokenizer, WordEstimateTokenizer};

#[cfg(feature = "huggingface")]
pub use tokenize::HuggingFaceTokenizer;

/// Chunk a document tree with default options and the word-estimate
/// tokenizer.
///
/// # Arguments
///
/// * `tree` - The document-item tree to chunk
/// * `max_tokens` - Maximum tokens per chunk
///
/// # Example
///
/// ```
/// use docchunk::{chunk_tree, DocumentTree};
///
/// let mut tree = DocumentTree::new("doc");
/// tree.add_paragraph("Some content.");
/// let chunks = chunk_tree(&tree, 256)?;
/// assert!(!chunks.is_empty());
/// # Ok::<(), docchunk::Error>(())
/// ```
pub fn chunk_tree(tree: &DocumentTree, max_tokens: usize) -> Result<Vec<Chunk>> {
    let chunker = Chunker::new(ChunkOptions::new(max_tokens))?;
    Ok(chunker.chunk(tree))
}

/// Chunk a document tree with custom options.
pub fn chunk_tree_with_options(tree: &DocumentTree, options: ChunkOptions) -> Result<Vec<Chunk>> {
    let chunker = Chunker::new(options)?;
    Ok(chunker.chunk(tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_tree_invalid_budget() {
        let tree = DocumentTree::new("doc");
        assert!(chunk_tree(&tree, 0).is_err());
    }

    #[test]
    fn test_chunk_tree_always_nonempty() {
        let tree = DocumentTree::new("doc");
        let chunks = chunk_tree(&tree, 64).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, ".");
    }

    #[test]
    fn test_chunk_json_round_trip() {
        let mut tree = DocumentTree::new("doc");
        tree.add_title("T");
        tree.add_paragraph("body");
        let chunks = chunk_tree(&tree, 64).unwrap();

        let json = serde_json::to_string(&chunks).unwrap();
        let back: Vec<Chunk> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), chunks.len());
        assert_eq!(back[0].text, chunks[0].text);
    }
}
