//! Chunk output types.

use super::DocumentItem;
use serde::{Deserialize, Serialize};

/// A bounded-size chunk of document text, ready for embedding/indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Items the chunk text was rendered from, in document order
    pub source_items: Vec<DocumentItem>,

    /// Rendered chunk text
    pub text: String,

    /// Headings active over the chunk, deduplicated in first-seen order
    pub used_headers: Vec<String>,

    /// First and last page the chunk's items appear on
    pub page_range: Option<(u32, u32)>,
}

impl Chunk {
    /// Number of characters in the chunk text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words in the chunk text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of lines in the chunk text.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Pages covered by the chunk's items, sorted and deduplicated.
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self
            .source_items
            .iter()
            .flat_map(|item| item.prov.iter().map(|p| p.page_no))
            .collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemBody, Provenance};

    #[test]
    fn test_counts() {
        let chunk = Chunk {
            source_items: vec![],
            text: "one two\nthree".into(),
            used_headers: vec![],
            page_range: None,
        };
        assert_eq!(chunk.word_count(), 3);
        assert_eq!(chunk.line_count(), 2);
        assert_eq!(chunk.char_count(), 13);
    }

    #[test]
    fn test_pages_sorted_dedup() {
        let a = DocumentItem::new("a", ItemBody::Paragraph { text: "x".into() })
            .with_prov(Provenance::page(2));
        let b = DocumentItem::new("b", ItemBody::Paragraph { text: "y".into() })
            .with_prov(Provenance::page(1))
            .with_prov(Provenance::page(2));
        let chunk = Chunk {
            source_items: vec![a, b],
            text: String::new(),
            used_headers: vec![],
            page_range: Some((1, 2)),
        };
        assert_eq!(chunk.pages(), vec![1, 2]);
    }
}
